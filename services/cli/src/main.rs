use crm_qualification_cli::run;

fn main() {
    if let Err(err) = run() {
        eprintln!("lead-qualify error: {err}");
        std::process::exit(1);
    }
}
