//! Page-wide state and the controller that owns it.
//!
//! `PageController` is the single owner of all page-wide state: the store,
//! the event log, theme, zoom, view modes, Konami progress, pending toasts
//! and the one-shot download suggestion flag.
//! Each operation runs to completion, performs its state change, queues any
//! toast, records one analytics event and hands back the DOM effect for the host.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{info, warn};
use url::Url;

use crate::analytics::{DownloadSink, EventLog, EventRecord, ExportReceipt, RecordOutcome};
use crate::config::{storage_keys, Config};
use crate::errors::AppError;
use crate::page::modes::{on_off, open_close};
use crate::page::shortcuts::{self, HELP_TOAST_DURATION};
use crate::page::theme::battery_forces_dark;
use crate::page::{
    check_cv_version, scroll_ui, BatteryStatus, ClipboardWrite, KeyPress, KonamiTracker, PdfLoad, PdfZoom,
    ScrollMetrics, ScrollUi, SharePlatform, Shortcut, Theme, Toast, ToastQueue, VersionCheck,
    ViewModes,
};
use crate::storage::KeyValueStore;

pub const WELCOME_DELAY: Duration = Duration::from_millis(500);

/// Something the host page must do after an operation: the DOM side of it.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEffect {
    ApplyTheme { theme: Theme, aria_label: &'static str },
    ApplyZoom { css: String },
    OpenUrl(Url),
    Print,
    DownloadPdf,
    EnterFullscreen,
    ExitFullscreen,
    ShowQrModal { image_url: Option<String> },
    HideQrModal,
    CopyText(String),
}

pub struct PageController<S: KeyValueStore> {
    config: Config,
    store: S,
    log: EventLog,
    theme: Theme,
    zoom: PdfZoom,
    modes: ViewModes,
    konami: KonamiTracker,
    toasts: ToastQueue,
    pdf_present: bool,
    download_suggested: bool,
    visit_start: Instant,
}

impl<S: KeyValueStore> PageController<S> {
    pub fn new(config: Config, store: S) -> Self {
        let log = EventLog::new(storage_keys::ANALYTICS, config.analytics_capacity);
        PageController {
            config,
            store,
            log,
            theme: Theme::Light,
            zoom: PdfZoom::default(),
            modes: ViewModes::default(),
            konami: KonamiTracker::default(),
            toasts: ToastQueue::default(),
            pdf_present: false,
            download_suggested: false,
            visit_start: Instant::now(),
        }
    }

    /// Page-load initialisation: theme, PDF check, version notice, load event.
    pub fn init(&mut self, pdf_present: bool) -> Vec<PageEffect> {
        info!("Initialising CV page v{}", self.config.cv_version);
        self.visit_start = Instant::now();
        self.pdf_present = pdf_present;

        let stored = self.store.get(storage_keys::THEME).unwrap_or_else(|e| {
            warn!("Cannot read stored theme: {e}");
            None
        });
        self.theme = Theme::initial(stored.as_deref(), self.config.prefers_dark);

        let mut effects = vec![self.theme_effect()];

        if pdf_present {
            effects.push(PageEffect::ApplyZoom {
                css: self.zoom.css_transform(),
            });
        } else {
            self.toasts.push(Toast::error("CV PDF introuvable."));
            self.track("pdf", "missing", None);
        }

        let version_check =
            check_cv_version(&mut self.store, storage_keys::CV_VERSION, &self.config.cv_version);
        if let VersionCheck::Updated { previous } = &version_check {
            info!("CV updated since last visit ({previous} -> {})", self.config.cv_version);
            self.toasts
                .push(Toast::success("Nouveau CV disponible depuis votre dernière visite."));
        }

        let page_url = self.config.page_url.clone();
        self.track("page", "load", Some(&page_url));
        effects
    }

    /// Appends one analytics event. Never fails; the outcome says whether it stuck.
    pub fn track(&mut self, category: &str, action: &str, label: Option<&str>) -> RecordOutcome {
        self.log.record(&mut self.store, category, action, label)
    }

    pub fn events(&self) -> Vec<EventRecord> {
        self.log.read_all(&self.store)
    }

    pub fn has_event_matching(&self, category: &str, action: &str) -> bool {
        self.log.has_event_matching(&self.store, category, action)
    }

    pub fn export_analytics<D>(&mut self, sink: &mut D) -> Result<ExportReceipt, AppError>
    where
        D: DownloadSink + ?Sized,
    {
        let receipt = self.log.export_as_json(&mut self.store, sink)?;
        self.toasts
            .push(Toast::success("Export des analytics en JSON lancé."));
        Ok(receipt)
    }

    // ── Theme ────────────────────────────────────────────────────────────

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) -> PageEffect {
        let next = self.theme.toggled();
        self.set_theme(next);
        self.track("theme", "toggle", Some(next.as_str()));
        self.toasts.push(Toast::success(next.activated_message()));
        self.theme_effect()
    }

    /// Forces the dark theme on a discharging, low battery.
    pub fn battery_changed(&mut self, battery: BatteryStatus) -> Option<PageEffect> {
        if !battery_forces_dark(battery, self.theme) {
            return None;
        }
        self.set_theme(Theme::Dark);
        self.track("ui", "battery_saver", Some("dark_forced"));
        self.toasts
            .push(Toast::success("Mode sombre activé (batterie faible)."));
        Some(self.theme_effect())
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        if let Err(e) = self.store.set(storage_keys::THEME, theme.as_str()) {
            warn!("Cannot persist theme: {e}");
        }
    }

    fn theme_effect(&self) -> PageEffect {
        PageEffect::ApplyTheme {
            theme: self.theme,
            aria_label: self.theme.toggle_aria_label(),
        }
    }

    // ── PDF ──────────────────────────────────────────────────────────────

    pub fn zoom(&self) -> f64 {
        self.zoom.current()
    }

    pub fn zoom_in(&mut self) -> Option<PageEffect> {
        self.zoom.zoom_in();
        self.after_zoom()
    }

    pub fn zoom_out(&mut self) -> Option<PageEffect> {
        self.zoom.zoom_out();
        self.after_zoom()
    }

    pub fn reset_zoom(&mut self) -> Option<PageEffect> {
        self.zoom.reset();
        self.after_zoom()
    }

    fn after_zoom(&mut self) -> Option<PageEffect> {
        let label = self.zoom.label();
        self.track("pdf", "zoom", Some(&label));
        self.pdf_present.then(|| PageEffect::ApplyZoom {
            css: self.zoom.css_transform(),
        })
    }

    pub fn pdf_load_finished(&mut self, outcome: PdfLoad) {
        match outcome {
            PdfLoad::Loaded => {
                self.track("pdf", "load", Some("success"));
            }
            PdfLoad::Failed => {
                self.track("pdf", "load", Some("error"));
                self.toasts
                    .push(Toast::error("Erreur de chargement du CV PDF."));
            }
            PdfLoad::Missing => {
                self.pdf_present = false;
                self.toasts.push(Toast::error("CV PDF introuvable."));
                self.track("pdf", "missing", None);
            }
        }
    }

    pub fn print(&mut self) -> Option<PageEffect> {
        if !self.pdf_present {
            self.toasts.push(Toast::error("CV PDF introuvable."));
            return None;
        }
        self.track("pdf", "print", None);
        Some(PageEffect::Print)
    }

    /// Triggers the PDF download link; `source` says what triggered it.
    pub fn download_pdf(&mut self, source: &str) -> Option<PageEffect> {
        if !self.pdf_present {
            return None;
        }
        self.track("pdf", "download", Some(source));
        Some(PageEffect::DownloadPdf)
    }

    // ── Sharing, menus, modes ────────────────────────────────────────────

    pub fn share(&mut self, platform: SharePlatform) -> Result<PageEffect, AppError> {
        let url = platform.share_url(&self.config.page_url, &self.config.page_title)?;
        self.track("share", "click", Some(platform.as_str()));
        Ok(PageEffect::OpenUrl(url))
    }

    pub fn modes(&self) -> &ViewModes {
        &self.modes
    }

    pub fn toggle_contact_menu(&mut self) -> bool {
        self.modes.contact_menu_open = !self.modes.contact_menu_open;
        let open = self.modes.contact_menu_open;
        self.track("menu", "toggle_contact", Some(open_close(open)));
        open
    }

    pub fn toggle_share_menu(&mut self) -> bool {
        self.modes.share_menu_open = !self.modes.share_menu_open;
        let open = self.modes.share_menu_open;
        self.track("menu", "toggle_share", Some(open_close(open)));
        open
    }

    pub fn close_menus(&mut self) -> bool {
        self.modes.close_menus()
    }

    pub fn toggle_reading_mode(&mut self) -> bool {
        self.modes.reading = !self.modes.reading;
        let on = self.modes.reading;
        self.track("ui", "reading_mode", Some(on_off(on)));
        self.toasts.push(Toast::success(if on {
            "Mode lecture activé."
        } else {
            "Mode lecture désactivé."
        }));
        on
    }

    pub fn toggle_presentation_mode(&mut self) -> bool {
        self.modes.presentation = !self.modes.presentation;
        let on = self.modes.presentation;
        self.track("ui", "presentation_mode", Some(on_off(on)));
        self.toasts.push(Toast::success(if on {
            "Mode présentation activé."
        } else {
            "Mode présentation désactivé."
        }));
        on
    }

    pub fn toggle_fullscreen(&mut self) -> PageEffect {
        self.modes.fullscreen = !self.modes.fullscreen;
        if self.modes.fullscreen {
            self.track("fullscreen", "enter", None);
            PageEffect::EnterFullscreen
        } else {
            self.track("fullscreen", "exit", None);
            PageEffect::ExitFullscreen
        }
    }

    pub fn open_qr_modal(&mut self) -> PageEffect {
        self.modes.qr_modal_open = true;
        self.track("ui", "qr", Some("open"));
        PageEffect::ShowQrModal {
            image_url: self.config.qr_image_url.clone(),
        }
    }

    pub fn close_qr_modal(&mut self) -> Option<PageEffect> {
        if !self.modes.qr_modal_open {
            return None;
        }
        self.modes.qr_modal_open = false;
        Some(PageEffect::HideQrModal)
    }

    /// Asks the host to put `text` on the clipboard. Empty text is ignored.
    /// The host reports back through `clipboard_written`.
    pub fn copy_to_clipboard(&mut self, text: &str) -> Option<PageEffect> {
        if text.is_empty() {
            return None;
        }
        Some(PageEffect::CopyText(text.to_string()))
    }

    pub fn clipboard_written(&mut self, text: &str, outcome: ClipboardWrite) {
        match outcome.action() {
            Some(action) => {
                self.toasts.push(Toast::success(outcome.message()));
                self.track("clipboard", action, Some(text));
            }
            None => {
                warn!("Clipboard copy failed");
                self.toasts.push(Toast::error(outcome.message()));
            }
        }
    }

    pub fn scroll(&self, metrics: ScrollMetrics) -> ScrollUi {
        scroll_ui(metrics)
    }

    pub fn network_changed(&mut self, online: bool) {
        if online {
            self.toasts.push(Toast::success("Connexion rétablie."));
            self.track("network", "status", Some("online"));
        } else {
            self.toasts.push(Toast::error("Vous êtes hors ligne."));
            self.track("network", "status", Some("offline"));
        }
    }

    // ── Keyboard ─────────────────────────────────────────────────────────

    /// Runs the shortcut bound to `press`, then feeds the Konami tracker.
    /// Escape only closes menus and never advances the Konami sequence.
    pub fn handle_key(&mut self, press: &KeyPress) -> Option<PageEffect> {
        let shortcut = shortcuts::dispatch(press);
        if shortcut == Some(Shortcut::CloseMenus) {
            self.close_menus();
            return None;
        }

        let effect = shortcut.and_then(|s| self.run_shortcut(s));

        if self.konami.feed(&press.key) {
            self.trigger_easter_egg();
        }
        effect
    }

    fn run_shortcut(&mut self, shortcut: Shortcut) -> Option<PageEffect> {
        match shortcut {
            Shortcut::CloseMenus => {
                self.close_menus();
                None
            }
            Shortcut::ZoomIn => self.zoom_in(),
            Shortcut::ZoomOut => self.zoom_out(),
            Shortcut::ZoomReset => self.reset_zoom(),
            Shortcut::ToggleContactMenu => {
                self.toggle_contact_menu();
                None
            }
            Shortcut::DownloadPdf => self.download_pdf("shortcut"),
            Shortcut::Print => self.print(),
            Shortcut::ToggleTheme => Some(self.toggle_theme()),
            Shortcut::ToggleShareMenu => {
                self.toggle_share_menu();
                None
            }
            Shortcut::ToggleReadingMode => {
                self.toggle_reading_mode();
                None
            }
            Shortcut::TogglePresentationMode => {
                self.toggle_presentation_mode();
                None
            }
            Shortcut::ShowHelp => {
                self.toasts.push(
                    Toast::success(shortcuts::help_message()).with_duration(HELP_TOAST_DURATION),
                );
                None
            }
        }
    }

    fn trigger_easter_egg(&mut self) {
        self.toasts
            .push(Toast::success("Easter egg débloqué ! Merci pour votre curiosité."));
        self.track("ui", "easter_egg", Some("konami"));
    }

    // ── Timers and lifecycle ─────────────────────────────────────────────

    pub fn welcome(&mut self) {
        self.toasts.push(Toast::success("Bienvenue sur mon CV !"));
    }

    /// Fired once by the suggestion timer. Suggests the PDF download unless
    /// already suggested or the visitor has downloaded it at some point.
    pub fn suggest_download(&mut self) -> bool {
        if self.download_suggested || self.has_event_matching("pdf", "download") {
            return false;
        }
        self.toasts.push(Toast::success(
            "Vous pouvez télécharger mon CV en PDF avec le bouton dédié.",
        ));
        self.track("ui", "suggestion", Some("download_pdf"));
        self.download_suggested = true;
        true
    }

    /// Records how long the page was open, rounded to whole seconds.
    pub fn finish_visit(&mut self) -> Duration {
        let elapsed = self.visit_start.elapsed();
        let seconds = elapsed.as_secs_f64().round() as u64;
        self.track("page", "duration", Some(&format!("{seconds}s")));
        elapsed
    }

    pub fn toasts_mut(&mut self) -> &mut ToastQueue {
        &mut self.toasts
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::shortcuts::KONAMI_CODE;
    use crate::storage::MemoryStore;

    fn controller() -> PageController<MemoryStore> {
        PageController::new(Config::default(), MemoryStore::new())
    }

    fn started() -> PageController<MemoryStore> {
        let mut page = controller();
        page.init(true);
        page
    }

    fn last_event(page: &PageController<MemoryStore>) -> (String, String, Option<String>) {
        let e = page.events().pop().expect("at least one event");
        (e.category, e.action, e.label)
    }

    fn event(c: &str, a: &str, l: Option<&str>) -> (String, String, Option<String>) {
        (c.to_string(), a.to_string(), l.map(str::to_string))
    }

    fn pending_messages(page: &PageController<MemoryStore>) -> Vec<String> {
        page.toasts.pending().map(|t| t.message.clone()).collect()
    }

    #[test]
    fn test_init_records_page_load() {
        let page = started();
        assert_eq!(
            last_event(&page),
            event("page", "load", Some("https://example.com/cv"))
        );
    }

    #[test]
    fn test_init_uses_stored_theme() {
        let mut store = MemoryStore::new();
        store.set(storage_keys::THEME, "dark").unwrap();
        let mut page = PageController::new(Config::default(), store);
        let effects = page.init(true);
        assert_eq!(page.theme(), Theme::Dark);
        assert_eq!(
            effects[0],
            PageEffect::ApplyTheme {
                theme: Theme::Dark,
                aria_label: "Passer en mode clair"
            }
        );
    }

    #[test]
    fn test_init_falls_back_to_system_preference() {
        let config = Config {
            prefers_dark: true,
            ..Config::default()
        };
        let mut page = PageController::new(config, MemoryStore::new());
        page.init(true);
        assert_eq!(page.theme(), Theme::Dark);
    }

    #[test]
    fn test_init_without_pdf_reports_missing() {
        let mut page = controller();
        let effects = page.init(false);
        assert_eq!(effects.len(), 1);
        assert!(page.has_event_matching("pdf", "missing"));
        assert!(pending_messages(&page).contains(&"CV PDF introuvable.".to_string()));
    }

    #[test]
    fn test_init_announces_new_cv_version() {
        let mut store = MemoryStore::new();
        store.set(storage_keys::CV_VERSION, "2024-01-01").unwrap();
        let mut page = PageController::new(Config::default(), store);
        page.init(true);
        assert!(pending_messages(&page)
            .contains(&"Nouveau CV disponible depuis votre dernière visite.".to_string()));
    }

    #[test]
    fn test_toggle_theme_persists_and_records() {
        let mut page = started();
        let effect = page.toggle_theme();
        assert_eq!(
            effect,
            PageEffect::ApplyTheme {
                theme: Theme::Dark,
                aria_label: "Passer en mode clair"
            }
        );
        assert_eq!(
            page.store().get(storage_keys::THEME).unwrap().as_deref(),
            Some("dark")
        );
        assert_eq!(last_event(&page), event("theme", "toggle", Some("dark")));

        page.toggle_theme();
        assert_eq!(last_event(&page), event("theme", "toggle", Some("light")));
    }

    #[test]
    fn test_battery_saver_forces_dark_once() {
        let mut page = started();
        let low = BatteryStatus {
            level: 0.05,
            charging: false,
        };
        assert!(page.battery_changed(low).is_some());
        assert_eq!(
            last_event(&page),
            event("ui", "battery_saver", Some("dark_forced"))
        );
        assert!(page.battery_changed(low).is_none());
    }

    #[test]
    fn test_zoom_records_two_decimal_label() {
        let mut page = started();
        let effect = page.zoom_in();
        assert!(matches!(effect, Some(PageEffect::ApplyZoom { .. })));
        assert_eq!(last_event(&page), event("pdf", "zoom", Some("1.10")));

        page.reset_zoom();
        assert_eq!(last_event(&page), event("pdf", "zoom", Some("1.00")));
    }

    #[test]
    fn test_print_without_pdf_records_nothing() {
        let mut page = controller();
        page.init(false);
        assert!(page.print().is_none());
        assert!(!page.has_event_matching("pdf", "print"));
    }

    #[test]
    fn test_pdf_load_outcomes() {
        let mut page = started();
        page.pdf_load_finished(PdfLoad::Loaded);
        assert_eq!(last_event(&page), event("pdf", "load", Some("success")));
        page.pdf_load_finished(PdfLoad::Failed);
        assert_eq!(last_event(&page), event("pdf", "load", Some("error")));
    }

    #[test]
    fn test_share_opens_url_and_records_platform() {
        let mut page = started();
        let effect = page.share(SharePlatform::LinkedIn).unwrap();
        match effect {
            PageEffect::OpenUrl(url) => assert_eq!(url.host_str(), Some("www.linkedin.com")),
            other => panic!("unexpected effect {other:?}"),
        }
        assert_eq!(last_event(&page), event("share", "click", Some("linkedin")));
    }

    #[test]
    fn test_menus_toggle_and_escape_closes() {
        let mut page = started();
        assert!(page.toggle_contact_menu());
        assert_eq!(
            last_event(&page),
            event("menu", "toggle_contact", Some("open"))
        );
        page.toggle_share_menu();
        assert!(page.handle_key(&KeyPress::plain("Escape")).is_none());
        assert!(!page.modes().contact_menu_open);
        assert!(!page.modes().share_menu_open);
    }

    #[test]
    fn test_fullscreen_toggles_enter_exit() {
        let mut page = started();
        assert_eq!(page.toggle_fullscreen(), PageEffect::EnterFullscreen);
        assert_eq!(last_event(&page), event("fullscreen", "enter", None));
        assert_eq!(page.toggle_fullscreen(), PageEffect::ExitFullscreen);
        assert_eq!(last_event(&page), event("fullscreen", "exit", None));
    }

    #[test]
    fn test_reading_and_presentation_modes() {
        let mut page = started();
        assert!(page.toggle_reading_mode());
        assert_eq!(last_event(&page), event("ui", "reading_mode", Some("on")));
        assert!(page.toggle_presentation_mode());
        assert!(!page.toggle_presentation_mode());
        assert_eq!(
            last_event(&page),
            event("ui", "presentation_mode", Some("off"))
        );
    }

    #[test]
    fn test_qr_modal_uses_configured_image() {
        let config = Config {
            qr_image_url: Some("https://example.com/qr.png".to_string()),
            ..Config::default()
        };
        let mut page = PageController::new(config, MemoryStore::new());
        page.init(true);
        assert_eq!(
            page.open_qr_modal(),
            PageEffect::ShowQrModal {
                image_url: Some("https://example.com/qr.png".to_string())
            }
        );
        assert_eq!(last_event(&page), event("ui", "qr", Some("open")));
        assert_eq!(page.close_qr_modal(), Some(PageEffect::HideQrModal));
        assert_eq!(page.close_qr_modal(), None);
    }

    #[test]
    fn test_copy_asks_host_and_ignores_empty_text() {
        let mut page = started();
        assert_eq!(
            page.copy_to_clipboard("contact@example.com"),
            Some(PageEffect::CopyText("contact@example.com".to_string()))
        );
        assert_eq!(page.copy_to_clipboard(""), None);
        assert!(!page.has_event_matching("clipboard", "copy"));
    }

    #[test]
    fn test_clipboard_outcomes_record_copy_or_fallback() {
        let mut page = started();
        page.clipboard_written("contact@example.com", ClipboardWrite::Copied);
        assert_eq!(
            last_event(&page),
            event("clipboard", "copy", Some("contact@example.com"))
        );

        page.clipboard_written("+33 6 00 00 00 00", ClipboardWrite::CopiedWithFallback);
        assert_eq!(
            last_event(&page),
            event("clipboard", "copy_fallback", Some("+33 6 00 00 00 00"))
        );
        assert!(pending_messages(&page).contains(&"Copié dans le presse-papiers.".to_string()));
    }

    #[test]
    fn test_failed_copy_shows_error_and_records_nothing() {
        let mut page = started();
        let before = page.events().len();
        page.clipboard_written("contact@example.com", ClipboardWrite::Failed);
        assert_eq!(page.events().len(), before);
        let failed = page.toasts.pending().last().unwrap();
        assert_eq!(failed.message, "Impossible de copier.");
        assert_eq!(failed.kind, crate::page::toast::ToastKind::Error);
    }

    #[test]
    fn test_network_status_events() {
        let mut page = started();
        page.network_changed(false);
        assert_eq!(last_event(&page), event("network", "status", Some("offline")));
        page.network_changed(true);
        assert_eq!(last_event(&page), event("network", "status", Some("online")));
    }

    #[test]
    fn test_download_shortcut_records_source() {
        let mut page = started();
        let effect = page.handle_key(&KeyPress::plain("d"));
        assert_eq!(effect, Some(PageEffect::DownloadPdf));
        assert_eq!(last_event(&page), event("pdf", "download", Some("shortcut")));
    }

    #[test]
    fn test_ctrl_zoom_shortcut() {
        let mut page = started();
        page.handle_key(&KeyPress::ctrl("+"));
        assert_eq!(page.zoom(), 1.1);
    }

    #[test]
    fn test_help_toast_lasts_eight_seconds() {
        let mut page = started();
        page.handle_key(&KeyPress::plain("?"));
        let help = page.toasts.pending().last().unwrap();
        assert_eq!(help.duration, Duration::from_secs(8));
        assert!(help.message.starts_with("Raccourcis :"));
    }

    #[test]
    fn test_konami_code_triggers_easter_egg() {
        let mut page = started();
        for key in KONAMI_CODE {
            page.handle_key(&KeyPress::plain(key));
        }
        assert!(page.has_event_matching("ui", "easter_egg"));
        // "b" is not bound, "a" is not bound; the arrows are not either.
        assert!(!page.has_event_matching("theme", "toggle"));
    }

    #[test]
    fn test_suggestion_fires_once() {
        let mut page = started();
        assert!(page.suggest_download());
        assert_eq!(
            last_event(&page),
            event("ui", "suggestion", Some("download_pdf"))
        );
        assert!(!page.suggest_download());
    }

    #[test]
    fn test_no_suggestion_after_download() {
        let mut page = started();
        page.download_pdf("button");
        assert!(!page.suggest_download());
    }

    #[test]
    fn test_no_suggestion_when_download_survives_reload() {
        let mut first = started();
        first.download_pdf("button");
        let store = first.store().clone();

        let mut second = PageController::new(Config::default(), store);
        second.init(true);
        assert!(!second.suggest_download());
    }

    #[test]
    fn test_unavailable_storage_never_blocks_the_page() {
        let mut page = PageController::new(Config::default(), MemoryStore::unavailable());
        page.init(true);
        assert_eq!(page.toggle_theme(), page.theme_effect());
        assert!(page.zoom_in().is_some());
        assert!(!page.track("pdf", "print", None).is_recorded());
        assert!(page.events().is_empty());
        // Without a readable log the suggestion cannot see a download, so it still fires.
        assert!(page.suggest_download());
    }

    #[tokio::test(start_paused = true)]
    async fn test_visit_duration_is_rounded_seconds() {
        let mut page = started();
        tokio::time::advance(Duration::from_millis(12_600)).await;
        page.finish_visit();
        assert_eq!(last_event(&page), event("page", "duration", Some("13s")));
    }
}
