use colored::Colorize;
use env_logger::{Builder, Env};
use std::io::Write;

/// Install the global logger.
///
/// `RUST_LOG` controls filtering (default `info`). Records with the
/// `SKIP_FORMAT` target are printed verbatim.
pub fn init_logging() {
    let logging_env = Env::default().filter_or("RUST_LOG", "info");
    Builder::from_env(logging_env)
        .format(|buf, record| {
            if record.target() == "SKIP_FORMAT" {
                return writeln!(buf, "{}", record.args());
            }

            let level = match record.level() {
                log::Level::Error => "error".red().bold(),
                log::Level::Warn => "warn".yellow().bold(),
                _ => "".normal(),
            };

            writeln!(
                buf,
                "{} {} {}{}",
                chrono::Local::now().format("%H:%M:%S").to_string().dimmed(),
                short_target(record.target()).bold().bright_yellow(),
                if level.is_empty() {
                    String::new()
                } else {
                    format!("{level} ")
                },
                record.args()
            )
        })
        .init();
}

/// `resort_site::render::blocks` → `render`; explicit targets pass through.
fn short_target(target: &str) -> String {
    let trimmed = target.strip_prefix("resort_site::").unwrap_or(target);
    trimmed
        .split("::")
        .next()
        .unwrap_or(trimmed)
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_target_strips_crate_prefix() {
        assert_eq!(short_target("resort_site::render::dispatch"), "render");
        assert_eq!(short_target("sitemap"), "sitemap");
    }
}
