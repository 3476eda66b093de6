mod bootstrap;

use std::io::BufRead;

use anyhow::Result;
use bp_core::settings::Settings;
use bp_data::session::{Session, SessionConfig};

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("bp-report v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!(
        "Columns: {}, threshold: {}, report mode: {}",
        settings.columns,
        settings.threshold,
        settings.report
    );

    let config = SessionConfig {
        columns: settings.effective_columns(),
        alarm: settings.alarm_char(),
        threshold: settings.threshold,
        report_mode: settings.report,
    };

    let reader = bootstrap::open_input(settings.infile.as_ref())?;
    let mut session = Session::new(config);

    for line in reader.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                tracing::warn!("Skipping unreadable line: {}", e);
                continue;
            }
        };
        session.process_line(&line)?;
    }

    for out in session.finish()? {
        println!("{}", out);
    }

    Ok(())
}
