use cucumber::gherkin::Step;
use cucumber::then;
use jsonapi_core::{expected_keys, ValueKind};
use jsonapi_exec::StepError;

use super::docstring;
use crate::world::ApiWorld;

#[then(regex = r"^I get an? (\d+) response$")]
fn status(world: &mut ApiWorld, code: u16) -> Result<(), StepError> {
    world.ctx.assert_status(code)
}

#[then(regex = r#"^scope into the "([^"]*)" property$"#)]
fn scope_into_property(world: &mut ApiWorld, path: String) -> Result<(), StepError> {
    world.ctx.scope_into_property(path);
    Ok(())
}

#[then(regex = r#"^scope into the first "([^"]*)" element$"#)]
fn scope_into_first_element(world: &mut ApiWorld, name: String) -> Result<(), StepError> {
    world.ctx.scope_into_first_element(&name);
    Ok(())
}

#[then(regex = r"^the structure matches:$")]
fn structure(world: &mut ApiWorld, step: &Step) -> Result<(), StepError> {
    let keys = expected_keys(docstring(step)?);
    world.ctx.assert_structure(&keys)
}

#[then(regex = r#"^the "([^"]*)" property is an? (object|array|integer|string|boolean)$"#)]
fn property_kind(world: &mut ApiWorld, property: String, name: String) -> Result<(), StepError> {
    let kind: ValueKind = name.parse()?;
    world.ctx.assert_kind(&property, kind)
}

#[then(regex = r#"^the "([^"]*)" property is an array with (\d+) items?$"#)]
fn array_len(world: &mut ApiWorld, property: String, count: usize) -> Result<(), StepError> {
    world.ctx.assert_array_len(&property, count)
}

// Ignores the active scope: `property` is looked up from the response root.
#[then(regex = r#"^the "([^"]*)" property in the response contains (\d+) items?$"#)]
fn response_item_count(
    world: &mut ApiWorld,
    property: String,
    count: usize,
) -> Result<(), StepError> {
    world.ctx.assert_response_item_count(&property, count)
}

#[then(regex = r#"^the "([^"]*)" property is an empty array$"#)]
fn empty_array(world: &mut ApiWorld, property: String) -> Result<(), StepError> {
    world.ctx.assert_empty_array(&property)
}

#[then(regex = r#"^the "([^"]*)" property is an? integer equall?ing (-?\d+)$"#)]
fn integer_eq(world: &mut ApiWorld, property: String, expected: i64) -> Result<(), StepError> {
    world.ctx.assert_integer_eq(&property, expected)
}

#[then(regex = r#"^the "([^"]*)" property is an? string equall?ing "([^"]*)"$"#)]
fn string_eq(world: &mut ApiWorld, property: String, expected: String) -> Result<(), StepError> {
    world.ctx.assert_string_eq(&property, &expected)
}

#[then(regex = r#"^the "([^"]*)" property is an? boolean equall?ing (\S+)$"#)]
fn boolean_eq(world: &mut ApiWorld, property: String, literal: String) -> Result<(), StepError> {
    world.ctx.assert_boolean_eq(&property, &literal)
}

#[then(regex = r"^echo last request$")]
fn echo_request(world: &mut ApiWorld) -> Result<(), StepError> {
    println!("{}", world.ctx.echo_last_request()?);
    Ok(())
}

#[then(regex = r"^echo last response$")]
fn echo_response(world: &mut ApiWorld) -> Result<(), StepError> {
    println!("{}", world.ctx.echo_last_response()?);
    Ok(())
}
