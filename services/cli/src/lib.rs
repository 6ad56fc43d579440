mod cli;
mod commands;
mod demo;
mod infra;

use crm_qualification::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
