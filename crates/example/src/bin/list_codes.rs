//! Prints the JSON form of error codes.
//!
//! With no arguments every code from 0 up to the first undeclared one is
//! listed; otherwise each argument is looked up by name.

use enumtab_example::Error;
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    let names: Vec<String> = env::args().skip(1).collect();

    if names.is_empty() {
        let mut code = 0;
        loop {
            let error = Error(code);
            print_json(error);
            if error.to_string().starts_with("Error(") {
                break;
            }
            code += 1;
        }
        return ExitCode::SUCCESS;
    }

    let mut status = ExitCode::SUCCESS;
    for name in &names {
        match name.parse::<Error>() {
            Ok(error) => print_json(error),
            Err(err) => {
                eprintln!("{err}");
                status = ExitCode::FAILURE;
            }
        }
    }
    status
}

fn print_json(error: Error) {
    match serde_json::to_string(&error) {
        Ok(json) => println!("{:>4} {json}", error.0),
        Err(err) => eprintln!("failed to encode {error}: {err}"),
    }
}
