use cucumber::gherkin::Step;
use cucumber::given;
use jsonapi_exec::{Grant, StepError};

use super::docstring;
use crate::world::ApiWorld;

#[given(regex = r"^I use the access token$")]
fn use_configured_token(world: &mut ApiWorld) -> Result<(), StepError> {
    world.ctx.use_configured_access_token()
}

#[given(regex = r#"^I use access token "([^"]*)"$"#)]
fn use_token(world: &mut ApiWorld, token: String) -> Result<(), StepError> {
    world.ctx.use_access_token(token);
    Ok(())
}

#[given(regex = r#"^I oauth with "([^"]*)" and "([^"]*)"$"#)]
async fn password_grant(
    world: &mut ApiWorld,
    username: String,
    password: String,
) -> Result<(), StepError> {
    world.ctx.oauth(Grant::password(username, password), None).await
}

#[given(regex = r#"^I oauth with "([^"]*)" and "([^"]*)" and scope "([^"]*)"$"#)]
async fn password_grant_scoped(
    world: &mut ApiWorld,
    username: String,
    password: String,
    scope: String,
) -> Result<(), StepError> {
    world.ctx.oauth(Grant::password(username, password), Some(&scope)).await
}

#[given(regex = r"^I oauth using the client credentials grant$")]
async fn client_credentials(world: &mut ApiWorld) -> Result<(), StepError> {
    world.ctx.oauth(Grant::client_credentials(), None).await
}

#[given(regex = r#"^I oauth using the client credentials grant with scope "([^"]*)"$"#)]
async fn client_credentials_scoped(world: &mut ApiWorld, scope: String) -> Result<(), StepError> {
    world.ctx.oauth(Grant::client_credentials(), Some(&scope)).await
}

#[given(regex = r#"^I oauth using the client credentials grant with "([^"]*)" and "([^"]*)"$"#)]
async fn explicit_client_credentials(
    world: &mut ApiWorld,
    id: String,
    secret: String,
) -> Result<(), StepError> {
    world.ctx.oauth(Grant::client_credentials_with(id, secret), None).await
}

#[given(regex = r#"^I oauth using the client credentials grant with "([^"]*)" and "([^"]*)" and scope "([^"]*)"$"#)]
async fn explicit_client_credentials_scoped(
    world: &mut ApiWorld,
    id: String,
    secret: String,
    scope: String,
) -> Result<(), StepError> {
    world
        .ctx
        .oauth(Grant::client_credentials_with(id, secret), Some(&scope))
        .await
}

#[given(regex = r#"^I add a "([^"]*)" header with the value "([^"]*)"$"#)]
fn add_header(world: &mut ApiWorld, name: String, value: String) -> Result<(), StepError> {
    world.ctx.add_header(name, value);
    Ok(())
}

#[given(regex = r"^I have the payload:$")]
fn payload(world: &mut ApiWorld, step: &Step) -> Result<(), StepError> {
    let raw = docstring(step)?.to_string();
    world.ctx.set_payload(raw);
    Ok(())
}
