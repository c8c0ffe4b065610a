use s3_bucket_hardener::{args, report, run_app};

fn main() {
    // Parse command-line arguments; invalid values never reach the provider
    let args = args::args_checks();

    let report = match run_app(&args) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Application error: {e}");
            std::process::exit(1);
        }
    };

    match report::render(&report, args.output) {
        Ok(rendered) => println!("{rendered}"),
        Err(e) => {
            eprintln!("Application error: {e}");
            std::process::exit(1);
        }
    }

    if args.strict && !report.is_clean() {
        std::process::exit(1);
    }
}
