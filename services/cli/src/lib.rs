mod cli;
mod demo;

use license_portal::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
