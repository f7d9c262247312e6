//! Best-effort display of the written chart in the system image viewer.

use rankgraph_common::{RankGraphError, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Whether a graphical session is reachable, given the relevant variables.
///
/// Only meaningful on Linux and the BSDs; other platforms always have one.
pub fn has_graphical_session(display: Option<&str>, wayland_display: Option<&str>) -> bool {
    if !cfg!(any(
        target_os = "linux",
        target_os = "freebsd",
        target_os = "openbsd",
        target_os = "netbsd"
    )) {
        return true;
    }
    let set = |v: Option<&str>| v.is_some_and(|s| !s.trim().is_empty());
    set(display) || set(wayland_display)
}

/// Command that opens `path` with the platform's default handler.
pub fn opener_command(path: &Path) -> Command {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else {
        Command::new("xdg-open")
    };
    command.arg(path);
    command
}

/// Opens the chart without waiting for the viewer to exit.
pub fn open_chart(path: &Path) -> Result<()> {
    let display = std::env::var("DISPLAY").ok();
    let wayland = std::env::var("WAYLAND_DISPLAY").ok();
    if !has_graphical_session(display.as_deref(), wayland.as_deref()) {
        return Err(RankGraphError::display("no graphical session available"));
    }

    let mut command = opener_command(path);
    debug!(command = ?command, "Opening chart");
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|e| RankGraphError::display(format!("failed to launch viewer: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(target_os = "linux")]
    fn test_headless_detection() {
        assert!(!has_graphical_session(None, None));
        assert!(!has_graphical_session(Some(""), None));
        assert!(has_graphical_session(Some(":0"), None));
        assert!(has_graphical_session(None, Some("wayland-0")));
    }

    #[test]
    fn test_opener_targets_chart() {
        let command = opener_command(Path::new("rank_evolution.png"));
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args.last().unwrap().to_str(), Some("rank_evolution.png"));
    }
}
