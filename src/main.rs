use std::env;
use std::process;

fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    let args: Vec<String> = env::args().collect();
    process::exit(debrief::cli::run_with_args(&args));
}
