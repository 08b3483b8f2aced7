//! Responsible for behaviour related to logging statistics with a specific pre-fix.

use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::io::stdout;
use std::io::Write;
use std::sync::OnceLock;
use std::sync::RwLock;

use convert_case::Case;
use convert_case::Casing;

/// The options for statistic logging containing the statistic prefix and the (optional) casing of
/// the statistics.
pub(crate) struct StatisticOptions {
    // What is printed before a statistic is printed, the statistics will be printed in the
    // form `{PREFIX} {NAME}={VALUE}`
    statistic_prefix: &'static str,
    // The casing of the name of the statistic
    statistics_casing: Option<Case>,
    // The writer to which the statistics are written
    statistics_writer: Box<dyn Write + Send + Sync>,
}

impl Debug for StatisticOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatisticOptions")
            .field("statistic_prefix", &self.statistic_prefix)
            .field("statistics_casing", &self.statistics_casing)
            .field("statistics_writer", &"<Writer>")
            .finish()
    }
}

static STATISTIC_OPTIONS: OnceLock<RwLock<StatisticOptions>> = OnceLock::new();

/// Configures the logging of the statistics.
///
/// It specifies the prefix, the casing of the statistic names and the writer to be used for
/// writing statistics. In case no writer is specified, stdout will be used. Statistics are only
/// written once this function has been called.
pub fn configure_statistic_logging(
    prefix: &'static str,
    casing: Option<Case>,
    writer: Option<Box<dyn Write + Send + Sync>>,
) {
    let _ = STATISTIC_OPTIONS.get_or_init(|| {
        RwLock::from(StatisticOptions {
            statistic_prefix: prefix,
            statistics_casing: casing,
            statistics_writer: writer.unwrap_or(Box::new(stdout())),
        })
    });
}

/// Logs the provided statistic with name `name` and value `value`. At the moment it will log in
/// the format `STATISTIC_PREFIX NAME=VALUE`.
pub fn log_statistic(name: impl Display, value: impl Display) {
    if let Some(statistic_options_lock) = STATISTIC_OPTIONS.get() {
        if let Ok(mut statistic_options) = statistic_options_lock.write() {
            let name = if let Some(casing) = &statistic_options.statistics_casing {
                name.to_string().to_case(*casing)
            } else {
                name.to_string()
            };
            let prefix = statistic_options.statistic_prefix;
            let _ = writeln!(
                statistic_options.statistics_writer,
                "{prefix} {name}={value}"
            );
        }
    }
}

/// Returns whether or not statistics should be logged by determining whether the
/// [`StatisticOptions`] have been configured.
pub fn should_log_statistics() -> bool {
    STATISTIC_OPTIONS.get().is_some()
}
