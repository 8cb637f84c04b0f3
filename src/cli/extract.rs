use anyhow::Context;
use tracing::info;

use crate::cli::ExtractArgs;
use crate::extract::extract_report;

pub fn execute(args: ExtractArgs) -> anyhow::Result<()> {
    let html = std::fs::read_to_string(&args.file)
        .with_context(|| format!("reading {:?}", args.file))?;

    let report = extract_report(&html)
        .with_context(|| format!("document rejected: {:?}", args.file))?;

    let json = serde_json::to_string_pretty(&report)?;
    match args.out {
        Some(path) => {
            std::fs::write(&path, json).with_context(|| format!("writing {path:?}"))?;
            info!("Wrote {:?}", path);
        }
        None => println!("{json}"),
    }

    Ok(())
}
