//! Line-driven page session.
//!
//! Stands in for the browser event loop: each input line is one interaction
//! (click, key press, scroll, ...) handled to completion by the controller, and
//! the page timers fire on the same loop between lines. Toasts and DOM effects
//! are written to the output as plain text.

use std::str::FromStr;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

use crate::analytics::DownloadSink;
use crate::errors::AppError;
use crate::page::{BatteryStatus, ClipboardWrite, KeyPress, PdfLoad, ScrollMetrics, SharePlatform, Toast};
use crate::state::{PageController, PageEffect, WELCOME_DELAY};
use crate::storage::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomCommand {
    In,
    Out,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    Contact,
    Share,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Key(KeyPress),
    Theme,
    Zoom(ZoomCommand),
    Print,
    Download,
    Share(SharePlatform),
    Reading,
    Presentation,
    Fullscreen,
    Menu(Menu),
    Qr,
    QrClose,
    Copy { text: String, outcome: ClipboardWrite },
    Scroll(ScrollMetrics),
    Battery(BatteryStatus),
    Network { online: bool },
    PdfLoad(PdfLoad),
    Export,
    Events,
    Help,
    Quit,
}

const USAGE: &str = "commands: key <k> | ctrl <k> | type <k> | theme | zoom in|out|reset | print | \
download | share linkedin|twitter|facebook|email | reading | presentation | fullscreen | \
menu contact|share | qr | qr close | copy|copy-fallback|copy-failed <text> | scroll <top> <height> <client> | battery <level> <charging> | \
network online|offline | pdf loaded|failed|missing | export | events | help | quit";

fn invalid(line: &str) -> AppError {
    AppError::InvalidCommand(format!("'{line}' (try 'help')"))
}

fn parse_number<T: FromStr>(raw: Option<&str>, line: &str) -> Result<T, AppError> {
    raw.and_then(|v| v.parse::<T>().ok())
        .ok_or_else(|| invalid(line))
}

/// Like `parse_number`, but `NaN` and infinities are rejected.
fn parse_measure(raw: Option<&str>, line: &str) -> Result<f64, AppError> {
    let value: f64 = parse_number(raw, line)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid(line))
    }
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        // Copy commands take the rest of the line verbatim.
        if let Some((verb, text)) = line.trim().split_once(char::is_whitespace) {
            let outcome = match verb {
                "copy" => Some(ClipboardWrite::Copied),
                "copy-fallback" => Some(ClipboardWrite::CopiedWithFallback),
                "copy-failed" => Some(ClipboardWrite::Failed),
                _ => None,
            };
            if let Some(outcome) = outcome {
                return Ok(Command::Copy {
                    text: text.trim().to_string(),
                    outcome,
                });
            }
        }

        let mut parts = line.split_whitespace();
        let Some(verb) = parts.next() else {
            return Err(invalid(line));
        };
        let arg = parts.next();

        let command = match (verb, arg) {
            ("key", Some(k)) => Command::Key(KeyPress::plain(k)),
            ("ctrl", Some(k)) => Command::Key(KeyPress::ctrl(k)),
            ("type", Some(k)) => Command::Key(KeyPress {
                in_text_field: true,
                ..KeyPress::plain(k)
            }),
            ("theme", None) => Command::Theme,
            ("zoom", Some("in")) => Command::Zoom(ZoomCommand::In),
            ("zoom", Some("out")) => Command::Zoom(ZoomCommand::Out),
            ("zoom", Some("reset")) => Command::Zoom(ZoomCommand::Reset),
            ("print", None) => Command::Print,
            ("download", None) => Command::Download,
            ("share", Some(p)) => Command::Share(p.parse()?),
            ("reading", None) => Command::Reading,
            ("presentation", None) => Command::Presentation,
            ("fullscreen", None) => Command::Fullscreen,
            ("menu", Some("contact")) => Command::Menu(Menu::Contact),
            ("menu", Some("share")) => Command::Menu(Menu::Share),
            ("qr", None) => Command::Qr,
            ("qr", Some("close")) => Command::QrClose,
            ("scroll", top) => Command::Scroll(ScrollMetrics {
                scroll_top: parse_measure(top, line)?,
                scroll_height: parse_measure(parts.next(), line)?,
                client_height: parse_measure(parts.next(), line)?,
            }),
            ("battery", level) => Command::Battery(BatteryStatus {
                level: parse_measure(level, line)?,
                charging: parse_number(parts.next(), line)?,
            }),
            ("network", Some("online")) => Command::Network { online: true },
            ("network", Some("offline")) => Command::Network { online: false },
            ("pdf", Some("loaded")) => Command::PdfLoad(PdfLoad::Loaded),
            ("pdf", Some("failed")) => Command::PdfLoad(PdfLoad::Failed),
            ("pdf", Some("missing")) => Command::PdfLoad(PdfLoad::Missing),
            ("export", None) => Command::Export,
            ("events", None) => Command::Events,
            ("help", None) => Command::Help,
            ("quit", None) | ("exit", None) => Command::Quit,
            _ => return Err(invalid(line)),
        };

        if parts.next().is_some() {
            return Err(invalid(line));
        }
        Ok(command)
    }
}

fn describe_effect(effect: &PageEffect) -> String {
    match effect {
        PageEffect::ApplyTheme { theme, aria_label } => {
            format!("> theme {theme} ({aria_label})")
        }
        PageEffect::ApplyZoom { css } => format!("> pdf style: {css}"),
        PageEffect::OpenUrl(url) => format!("> open {url}"),
        PageEffect::Print => "> print dialog".to_string(),
        PageEffect::DownloadPdf => "> download CV PDF".to_string(),
        PageEffect::EnterFullscreen => "> fullscreen on".to_string(),
        PageEffect::ExitFullscreen => "> fullscreen off".to_string(),
        PageEffect::ShowQrModal { image_url } => match image_url {
            Some(url) => format!("> QR modal: {url}"),
            None => "> QR modal (no image configured)".to_string(),
        },
        PageEffect::HideQrModal => "> QR modal closed".to_string(),
        PageEffect::CopyText(text) => format!("> copy to clipboard: {text}"),
    }
}

fn describe_body_classes<S: KeyValueStore>(page: &PageController<S>) -> String {
    let classes = page.modes().body_classes();
    if classes.is_empty() {
        "> body classes: none".to_string()
    } else {
        format!("> body classes: {}", classes.join(" "))
    }
}

fn describe_toast(toast: &Toast) -> String {
    format!("[{}] {}", toast.kind, toast.message)
}

/// Applies one command and returns the lines to print.
fn apply<S, D>(
    page: &mut PageController<S>,
    downloads: &mut D,
    command: Command,
) -> Result<Vec<String>, AppError>
where
    S: KeyValueStore,
    D: DownloadSink + ?Sized,
{
    let effects: Vec<PageEffect> = match command {
        Command::Key(press) => page.handle_key(&press).into_iter().collect(),
        Command::Theme => vec![page.toggle_theme()],
        Command::Zoom(ZoomCommand::In) => page.zoom_in().into_iter().collect(),
        Command::Zoom(ZoomCommand::Out) => page.zoom_out().into_iter().collect(),
        Command::Zoom(ZoomCommand::Reset) => page.reset_zoom().into_iter().collect(),
        Command::Print => page.print().into_iter().collect(),
        Command::Download => page.download_pdf("button").into_iter().collect(),
        Command::Share(platform) => vec![page.share(platform)?],
        Command::Reading => {
            page.toggle_reading_mode();
            return Ok(vec![describe_body_classes(page)]);
        }
        Command::Presentation => {
            page.toggle_presentation_mode();
            return Ok(vec![describe_body_classes(page)]);
        }
        Command::Fullscreen => vec![page.toggle_fullscreen()],
        Command::Menu(Menu::Contact) => {
            let open = page.toggle_contact_menu();
            return Ok(vec![format!("> contact menu {}", if open { "open" } else { "closed" })]);
        }
        Command::Menu(Menu::Share) => {
            let open = page.toggle_share_menu();
            return Ok(vec![format!("> share menu {}", if open { "open" } else { "closed" })]);
        }
        Command::Qr => vec![page.open_qr_modal()],
        Command::QrClose => page.close_qr_modal().into_iter().collect(),
        Command::Copy { text, outcome } => {
            let Some(effect) = page.copy_to_clipboard(&text) else {
                return Ok(Vec::new());
            };
            page.clipboard_written(&text, outcome);
            vec![effect]
        }
        Command::Scroll(metrics) => {
            let ui = page.scroll(metrics);
            return Ok(vec![format!(
                "> progress {:.1}%{}",
                ui.progress,
                if ui.show_back_to_top { ", back-to-top shown" } else { "" }
            )]);
        }
        Command::Battery(status) => page.battery_changed(status).into_iter().collect(),
        Command::Network { online } => {
            page.network_changed(online);
            Vec::new()
        }
        Command::PdfLoad(outcome) => {
            page.pdf_load_finished(outcome);
            Vec::new()
        }
        Command::Export => {
            let receipt = page.export_analytics(downloads)?;
            return Ok(vec![format!(
                "> exported {} events to {}",
                receipt.exported, receipt.location
            )]);
        }
        Command::Events => {
            let events = page.events();
            let mut lines = vec![format!("> {} events", events.len())];
            lines.extend(events.iter().map(|e| {
                format!(
                    "  {} {}/{} {}",
                    e.timestamp.to_rfc3339(),
                    e.category,
                    e.action,
                    e.label.as_deref().unwrap_or("-")
                )
            }));
            return Ok(lines);
        }
        Command::Help => return Ok(vec![USAGE.to_string()]),
        Command::Quit => Vec::new(),
    };
    Ok(effects.iter().map(describe_effect).collect())
}

async fn write_lines<W>(out: &mut W, lines: &[String]) -> Result<(), AppError>
where
    W: AsyncWrite + Unpin,
{
    for line in lines {
        out.write_all(line.as_bytes()).await?;
        out.write_all(b"\n").await?;
    }
    out.flush().await?;
    Ok(())
}

async fn show_toasts<S, W>(page: &mut PageController<S>, out: &mut W) -> Result<(), AppError>
where
    S: KeyValueStore,
    W: AsyncWrite + Unpin,
{
    let now = Instant::now();
    let expired = page.toasts_mut().expire(now);
    for toast in &expired {
        debug!("Toast expired: {}", toast.message);
    }
    let shown: Vec<String> = page
        .toasts_mut()
        .show_pending(now)
        .iter()
        .map(describe_toast)
        .collect();
    write_lines(out, &shown).await
}

/// Runs the page until `quit` or end of input, then records the visit duration.
pub async fn run_session<S, D, R, W>(
    page: &mut PageController<S>,
    downloads: &mut D,
    input: R,
    mut out: W,
    pdf_present: bool,
) -> Result<(), AppError>
where
    S: KeyValueStore,
    D: DownloadSink + ?Sized,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let effects = page.init(pdf_present);
    write_lines(&mut out, &effects.iter().map(describe_effect).collect::<Vec<_>>()).await?;

    let start = Instant::now();
    let mut welcome_at = Some(start + WELCOME_DELAY);
    let mut suggestion_at = Some(start + page.config().suggestion_delay);
    let mut lines = input.lines();

    loop {
        show_toasts(page, &mut out).await?;

        let next_timer = [welcome_at, suggestion_at, page.toasts_mut().next_expiry()]
            .into_iter()
            .flatten()
            .min();

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(command) => match apply(page, downloads, command) {
                        Ok(output) => write_lines(&mut out, &output).await?,
                        Err(e) => write_lines(&mut out, &[format!("! {}: {e}", e.code())]).await?,
                    },
                    Err(e) => write_lines(&mut out, &[format!("! {}: {e}", e.code())]).await?,
                }
            }
            _ = sleep_until(next_timer.unwrap_or(start)), if next_timer.is_some() => {
                let now = Instant::now();
                if welcome_at.is_some_and(|at| at <= now) {
                    welcome_at = None;
                    page.welcome();
                }
                if suggestion_at.is_some_and(|at| at <= now) {
                    suggestion_at = None;
                    page.suggest_download();
                }
            }
        }
    }

    let visited = page.finish_visit();
    info!("Session ended after {:.1}s", visited.as_secs_f64());
    show_toasts(page, &mut out).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::DirectoryDownloads;
    use crate::config::Config;
    use crate::storage::MemoryStore;
    use std::time::Duration;
    use tokio::io::{duplex, AsyncWriteExt, BufReader};

    fn page() -> PageController<MemoryStore> {
        PageController::new(Config::default(), MemoryStore::new())
    }

    async fn run_script(page: &mut PageController<MemoryStore>, script: &str) -> String {
        let dir = tempfile::tempdir().unwrap();
        let mut downloads = DirectoryDownloads::new(dir.path());
        let mut out = Vec::new();
        run_session(page, &mut downloads, script.as_bytes(), &mut out, true)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("theme".parse::<Command>().unwrap(), Command::Theme);
        assert_eq!(
            "ctrl +".parse::<Command>().unwrap(),
            Command::Key(KeyPress::ctrl("+"))
        );
        assert_eq!(
            "share email".parse::<Command>().unwrap(),
            Command::Share(SharePlatform::Email)
        );
        assert_eq!(
            "scroll 500 2000 1000".parse::<Command>().unwrap(),
            Command::Scroll(ScrollMetrics {
                scroll_top: 500.0,
                scroll_height: 2000.0,
                client_height: 1000.0,
            })
        );
        assert_eq!(
            "battery 0.1 false".parse::<Command>().unwrap(),
            Command::Battery(BatteryStatus {
                level: 0.1,
                charging: false
            })
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("zoom sideways".parse::<Command>().is_err());
        assert!("theme now".parse::<Command>().is_err());
        assert!("scroll 1 2".parse::<Command>().is_err());
        assert!("share myspace".parse::<Command>().is_err());
    }

    #[test]
    fn test_parse_copy_keeps_whole_text() {
        assert_eq!(
            "copy +33 6 00 00 00 00".parse::<Command>().unwrap(),
            Command::Copy {
                text: "+33 6 00 00 00 00".to_string(),
                outcome: ClipboardWrite::Copied,
            }
        );
        assert!(matches!(
            "copy-failed a@b.c".parse::<Command>().unwrap(),
            Command::Copy {
                outcome: ClipboardWrite::Failed,
                ..
            }
        ));
        assert!("copy".parse::<Command>().is_err());
    }

    #[tokio::test]
    async fn test_copy_commands_record_copy_and_fallback() {
        let mut page = page();
        let output = run_script(
            &mut page,
            "copy contact@example.com\ncopy-fallback 06 00\ncopy-failed x\n",
        )
        .await;

        assert!(output.contains("> copy to clipboard: contact@example.com"), "{output}");
        assert!(output.contains("[error] Impossible de copier."), "{output}");
        let copies: Vec<(String, Option<String>)> = page
            .events()
            .into_iter()
            .filter(|e| e.category == "clipboard")
            .map(|e| (e.action, e.label))
            .collect();
        assert_eq!(
            copies,
            vec![
                ("copy".to_string(), Some("contact@example.com".to_string())),
                ("copy_fallback".to_string(), Some("06 00".to_string())),
            ]
        );
    }

    #[test]
    fn test_parse_rejects_non_finite_measures() {
        assert!("scroll NaN 1 0".parse::<Command>().is_err());
        assert!("scroll 0 inf 10".parse::<Command>().is_err());
        assert!("battery NaN false".parse::<Command>().is_err());
        assert!("scroll 0 -1e3 10".parse::<Command>().is_ok());
    }

    #[tokio::test]
    async fn test_script_drives_controller() {
        let mut page = page();
        let output = run_script(&mut page, "theme\nzoom in\nshare linkedin\nquit\n").await;

        assert!(output.contains("> theme dark (Passer en mode clair)"), "{output}");
        assert!(output.contains("[success] Mode sombre activé."), "{output}");
        assert!(output.contains("transform: scale(1.1)"), "{output}");
        assert!(output.contains("> open https://www.linkedin.com/"), "{output}");

        let actions: Vec<String> = page.events().into_iter().map(|e| e.action).collect();
        assert_eq!(actions, vec!["load", "toggle", "zoom", "click", "duration"]);
    }

    #[tokio::test]
    async fn test_invalid_command_is_reported_and_session_continues() {
        let mut page = page();
        let output = run_script(&mut page, "frobnicate\nfullscreen\n").await;
        assert!(output.contains("! INVALID_COMMAND"), "{output}");
        assert!(output.contains("> fullscreen on"), "{output}");
    }

    #[tokio::test]
    async fn test_export_command_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut downloads = DirectoryDownloads::new(dir.path());
        let mut page = page();
        let mut out = Vec::new();
        run_session(&mut page, &mut downloads, &b"export\n"[..], &mut out, true)
            .await
            .unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("> exported 1 events"), "{output}");
        assert!(dir.path().join("cv-analytics.json").exists());
        assert!(page.has_event_matching("analytics", "export"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timers_fire_welcome_and_suggestion() {
        let (mut client, server) = duplex(64);
        let feeder = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(60)).await;
            client.write_all(b"quit\n").await.unwrap();
            client
        });

        let dir = tempfile::tempdir().unwrap();
        let mut downloads = DirectoryDownloads::new(dir.path());
        let mut page = page();
        let mut out = Vec::new();
        run_session(&mut page, &mut downloads, BufReader::new(server), &mut out, true)
            .await
            .unwrap();
        drop(feeder.await.unwrap());

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("[success] Bienvenue sur mon CV !"), "{output}");
        assert!(
            output.contains("Vous pouvez télécharger mon CV en PDF"),
            "{output}"
        );
        assert!(page.has_event_matching("ui", "suggestion"));
        assert_eq!(
            page.events().last().unwrap().label.as_deref(),
            Some("60s")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_suggestion_skipped_after_download() {
        let (mut client, server) = duplex(64);
        let feeder = tokio::spawn(async move {
            client.write_all(b"download\n").await.unwrap();
            tokio::time::sleep(Duration::from_secs(50)).await;
            client.write_all(b"quit\n").await.unwrap();
            client
        });

        let dir = tempfile::tempdir().unwrap();
        let mut downloads = DirectoryDownloads::new(dir.path());
        let mut page = page();
        run_session(&mut page, &mut downloads, BufReader::new(server), Vec::<u8>::new(), true)
            .await
            .unwrap();
        drop(feeder.await.unwrap());

        assert!(page.has_event_matching("pdf", "download"));
        assert!(!page.has_event_matching("ui", "suggestion"));
    }
}
