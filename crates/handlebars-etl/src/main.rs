use std::env;
use std::fs;
use std::process::ExitCode;

use handlebars_etl::dialects::sendgrid;

const BUNDLED_SAMPLE: &str = "demos/sample.hbs";

pub fn main() -> ExitCode {
    env_logger::init();

    let path = env::args().nth(1).unwrap_or_else(|| BUNDLED_SAMPLE.to_string());
    let template = match fs::read_to_string(&path) {
        Ok(template) => template,
        Err(err) => {
            eprintln!("Could not read {path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let registry = sendgrid::registry();
    match handlebars_etl::compile_with(&template, &registry) {
        Ok(etl) => {
            println!("{etl}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
