use std::io::Write;

use env_logger::{fmt::Color, Builder, Env};

/// Sends the log to stderr, every line tagged with a red `[+]`.
///
/// `RUST_LOG` takes precedence over the default level.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(default_level))
        .format(|buf, record| {
            let mut bracket = buf.style();
            bracket.set_color(Color::Red).set_bold(true);
            let mut plus = buf.style();
            plus.set_color(Color::Red);
            writeln!(
                buf,
                "{}{}{} {}",
                bracket.value("["),
                plus.value("+"),
                bracket.value("]"),
                record.args()
            )
        })
        .init();
}
