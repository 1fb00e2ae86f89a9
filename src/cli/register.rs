//! Register command: record an asset's location in the session manifest.
//!
//! Only the derived location is recorded; no bytes are copied.

use anyhow::{Context, Result, bail};

use super::args::RegisterArgs;
use super::common::Session;
use crate::asset::{extension_of, is_standardized};
use crate::log;
use crate::manifest::{AssetRecord, UpdateAsset};

/// Location to register: the standardized path for `--file`, or the
/// explicit `--location` as given.
fn target_location(args: &RegisterArgs) -> Result<String> {
    match (&args.file, &args.location) {
        (Some(file), _) => {
            let ext = extension_of(file)
                .with_context(|| format!("`{file}` has no file extension"))?;
            let path = args.format.standard_path(args.week, &ext);
            if !is_standardized(&path) {
                log!("warning"; "{} does not follow the standardized asset layout", path);
            }
            Ok(path)
        }
        (None, Some(location)) => Ok(location.trim().to_string()),
        (None, None) => bail!("either --file or --location is required"),
    }
}

/// Execute register command
pub async fn run_register(args: &RegisterArgs, session: &Session) -> Result<AssetRecord> {
    let location = target_location(args)?;
    let store = session.store();

    let record = store
        .dispatch(UpdateAsset {
            week: args.week,
            format: args.format,
            location,
        })
        .with_context(|| format!("cannot register {} for week {}", args.format, args.week))?;
    log!("register"; "registered to {}", record.location);

    if store.state().is_none() {
        log!("warning"; "no [manifest] state file configured, registration lasts for this run only");
    }

    let status = session.resolver.settle(args.week, args.format).await;
    match status.location() {
        Some(location) => log!("register"; "{} is live at {}", args.format, location),
        None => log!("register"; "{} is {}", args.format, status),
    }
    Ok(record)
}
