//! Opt-in log output for hosts that do not install their own logger.
//!
//! The kernels only talk to the `log` facade. A host application may install any
//! logger it likes; `enable_verbose_logging` is the batteries-included option.

use std::fs::OpenOptions;
use std::sync::Once;

use log::LevelFilter;

static INIT_LOGGER: Once = Once::new();

/// Installs an `env_logger` at `Debug` level with a plain `[LEVEL] message`
/// format, appending to `log_file` when given and to stderr otherwise.
/// Only the first call has any effect.
pub fn enable_verbose_logging(log_file: Option<String>) {
    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(LevelFilter::Debug);

        // Custom formatter: just print the level and message
        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()?;
            Ok(())
        });

        if let Some(filename) = log_file {
            match OpenOptions::new().append(true).create(true).open(&filename) {
                Ok(file) => {
                    builder.target(env_logger::Target::Pipe(Box::new(file)));
                }
                Err(err) => eprintln!("could not open log file {}: {}", filename, err),
            }
        }

        let _ = builder.try_init();
    });
}
