use clap::Parser;
use colored::Colorize;
use geolocator_parser::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    match commands::run(args) {
        Ok(_summary) => process::exit(0),
        Err(error) => {
            eprintln!("{} {:#}", "Error:".red().bold(), error);
            process::exit(1);
        }
    }
}
