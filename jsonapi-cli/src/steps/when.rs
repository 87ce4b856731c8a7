use cucumber::when;
use jsonapi_exec::{HttpMethod, StepError};

use crate::world::ApiWorld;

#[when(regex = r#"^I request "(\S+) ([^"]+)"$"#)]
async fn request(world: &mut ApiWorld, method: String, resource: String) -> Result<(), StepError> {
    let method: HttpMethod = method.parse()?;
    world.ctx.request(method, &resource).await?;
    Ok(())
}
