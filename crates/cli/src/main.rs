fn main() {
    tally_observability::init("warn");

    let args: Vec<String> = std::env::args().skip(1).collect();
    match tally_cli::run(&args) {
        Ok(output) => println!("{output}"),
        Err(err) => {
            tracing::error!("{err:#}");
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    }
}
