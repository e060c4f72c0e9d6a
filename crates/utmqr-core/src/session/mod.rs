//! Interactive session state.
//!
//! Owns the one parameter set of a session and everything derived from it.
//! Each field edit recomputes the tracking URL on the spot; renders happen
//! only on an explicit `generate`. Time enters through the `now` arguments,
//! so the two delayed actions (copied-indicator reset, post-render reveal)
//! are driven by whoever runs the event loop.

mod clipboard;
mod deferred;

pub use clipboard::{Clipboard, ClipboardError, Osc52Clipboard};
pub use deferred::Deferred;

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::config::{DocumentConfig, UtmQrConfig};
use crate::export::{self, Artifact, ExportFormat, ExportRequest};
use crate::render::{self, RenderError, RenderOptions, RenderedQr};
use crate::url_builder::TrackingParameters;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("enter a valid base URL to generate a QR code")]
    EmptyBaseUrl,
    #[error(transparent)]
    Render(#[from] RenderError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field {0:?}")]
pub struct UnknownField(pub String);

/// One of the four editable inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    BaseUrl,
    Source,
    Medium,
    Campaign,
}

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "base" | "url" | "base_url" => Ok(Field::BaseUrl),
            "source" | "utm_source" => Ok(Field::Source),
            "medium" | "utm_medium" => Ok(Field::Medium),
            "campaign" | "utm_campaign" => Ok(Field::Campaign),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::BaseUrl => "base",
            Field::Source => "source",
            Field::Medium => "medium",
            Field::Campaign => "campaign",
        })
    }
}

/// Delayed actions that came due during `tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The "copied" indicator went back to its idle state.
    CopiedReset,
    /// A fresh render is ready to be shown.
    Revealed,
}

#[derive(Debug)]
pub struct Session {
    params: TrackingParameters,
    generated_url: String,
    rendered: Option<RenderedQr>,
    render_opts: RenderOptions,
    document: DocumentConfig,
    copied: bool,
    copied_reset: Deferred,
    copied_delay: Duration,
    reveal: Deferred,
    reveal_delay: Duration,
}

impl Session {
    pub fn new(cfg: &UtmQrConfig) -> Self {
        Self {
            params: TrackingParameters::default(),
            generated_url: String::new(),
            rendered: None,
            render_opts: RenderOptions::from_config(cfg),
            document: cfg.document(),
            copied: false,
            copied_reset: Deferred::default(),
            copied_delay: Duration::from_millis(cfg.copied_reset_ms),
            reveal: Deferred::default(),
            reveal_delay: Duration::from_millis(cfg.reveal_delay_ms),
        }
    }

    pub fn params(&self) -> &TrackingParameters {
        &self.params
    }

    /// Replaces one input and recomputes the tracking URL.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::BaseUrl => self.params.base_url = value,
            Field::Source => self.params.source = value,
            Field::Medium => self.params.medium = value,
            Field::Campaign => self.params.campaign = value,
        }
        self.generated_url = self.params.generated_url();
        tracing::trace!(%field, url = %self.generated_url, "recomputed");
    }

    /// Current tracking URL; empty while the base URL is blank.
    pub fn generated_url(&self) -> &str {
        &self.generated_url
    }

    pub fn can_generate(&self) -> bool {
        !self.params.is_blank()
    }

    /// Renders the current URL, replacing any previous render.
    ///
    /// Refused while the base URL is blank. On failure the previous render
    /// (if any) stays in place.
    pub fn generate(&mut self, now: Instant) -> Result<&RenderedQr, SessionError> {
        if self.generated_url.is_empty() {
            return Err(SessionError::EmptyBaseUrl);
        }
        let rendered = render::render(&self.generated_url, &self.render_opts)?;
        self.reveal.schedule(now, self.reveal_delay);
        Ok(self.rendered.insert(rendered))
    }

    pub fn rendered(&self) -> Option<&RenderedQr> {
        self.rendered.as_ref()
    }

    /// True when the shown code encodes the current URL (no pending update).
    pub fn is_current(&self) -> bool {
        self.rendered
            .as_ref()
            .is_some_and(|r| r.value == self.generated_url)
    }

    /// Builds an export of the current render, named from the current base
    /// URL and campaign inputs. `Ok(None)` when nothing has been rendered.
    pub fn export(&self, format: ExportFormat) -> Result<Option<Artifact>, RenderError> {
        let Some(rendered) = self.rendered.as_ref() else {
            return Ok(None);
        };
        let request = ExportRequest {
            encoded_value: rendered.value.clone(),
            base_url_for_naming: self.params.base_url.clone(),
            campaign_for_naming: self.params.campaign.clone(),
            format,
        };
        export::export(&request, Some(rendered), &self.document)
    }

    /// Copies the current URL. Returns `Ok(false)` when there is nothing to copy.
    ///
    /// On success the copied flag is set and its reset scheduled; on failure
    /// the flag is left as it was and the error is logged and returned.
    pub fn copy_url(
        &mut self,
        clipboard: &mut dyn Clipboard,
        now: Instant,
    ) -> Result<bool, ClipboardError> {
        if self.generated_url.is_empty() {
            return Ok(false);
        }
        match clipboard.write_text(&self.generated_url) {
            Ok(()) => {
                self.copied = true;
                self.copied_reset.schedule(now, self.copied_delay);
                Ok(true)
            }
            Err(e) => {
                tracing::error!("failed to copy url: {e}");
                Err(e)
            }
        }
    }

    pub fn is_copied(&self) -> bool {
        self.copied
    }

    /// Runs the delayed actions that are due at `now`.
    pub fn tick(&mut self, now: Instant) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.copied_reset.fire_if_due(now) {
            self.copied = false;
            events.push(SessionEvent::CopiedReset);
        }
        if self.reveal.fire_if_due(now) && self.rendered.is_some() {
            events.push(SessionEvent::Revealed);
        }
        events
    }

    /// Earliest pending deadline, for event loops that sleep until it.
    pub fn next_deadline(&self) -> Option<Instant> {
        [self.copied_reset.deadline(), self.reveal.deadline()]
            .into_iter()
            .flatten()
            .min()
    }

    /// Cancels pending delayed actions; nothing fires after this.
    pub fn teardown(&mut self) {
        self.copied_reset.cancel();
        self.reveal.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeClipboard {
        fail: bool,
        written: Vec<String>,
    }

    impl Clipboard for FakeClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError::Unavailable("no display".to_string()));
            }
            self.written.push(text.to_string());
            Ok(())
        }
    }

    fn session() -> Session {
        Session::new(&UtmQrConfig::default())
    }

    #[test]
    fn every_edit_recomputes() {
        let mut s = session();
        assert_eq!(s.generated_url(), "");
        assert!(!s.can_generate());
        s.set(Field::BaseUrl, "shop.example");
        assert_eq!(s.generated_url(), "https://shop.example/");
        s.set(Field::Source, "newsletter");
        assert_eq!(s.generated_url(), "https://shop.example/?utm_source=newsletter");
        s.set(Field::Source, "  ");
        assert_eq!(s.generated_url(), "https://shop.example/");
        s.set(Field::BaseUrl, " ");
        assert_eq!(s.generated_url(), "");
    }

    #[test]
    fn generate_refused_when_blank() {
        let mut s = session();
        s.set(Field::Source, "x");
        assert!(matches!(
            s.generate(Instant::now()),
            Err(SessionError::EmptyBaseUrl)
        ));
        assert!(s.rendered().is_none());
    }

    #[test]
    fn generate_then_edit_marks_stale() {
        let mut s = session();
        s.set(Field::BaseUrl, "https://shop.example");
        s.generate(Instant::now()).unwrap();
        assert!(s.is_current());
        s.set(Field::Campaign, "launch");
        assert!(!s.is_current());
        assert_eq!(s.rendered().unwrap().value, "https://shop.example/");
    }

    #[test]
    fn export_requires_render() {
        let mut s = session();
        s.set(Field::BaseUrl, "https://shop.example");
        assert!(s.export(ExportFormat::Svg).unwrap().is_none());
        s.generate(Instant::now()).unwrap();
        let a = s.export(ExportFormat::Svg).unwrap().unwrap();
        assert!(a.filename.ends_with("_shop.example_nocampaign.svg"));
    }

    #[test]
    fn reveal_fires_after_delay() {
        let t0 = Instant::now();
        let mut s = session();
        s.set(Field::BaseUrl, "shop.example");
        s.generate(t0).unwrap();
        assert!(s.tick(t0).is_empty());
        assert_eq!(s.next_deadline(), Some(t0 + Duration::from_millis(100)));
        assert_eq!(
            s.tick(t0 + Duration::from_millis(100)),
            vec![SessionEvent::Revealed]
        );
        assert!(s.tick(t0 + Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn copy_sets_flag_and_resets() {
        let t0 = Instant::now();
        let mut s = session();
        let mut cb = FakeClipboard {
            fail: false,
            written: Vec::new(),
        };
        assert!(!s.copy_url(&mut cb, t0).unwrap());
        s.set(Field::BaseUrl, "shop.example");
        assert!(s.copy_url(&mut cb, t0).unwrap());
        assert_eq!(cb.written, vec!["https://shop.example/"]);
        assert!(s.is_copied());
        assert!(s.tick(t0 + Duration::from_millis(1999)).is_empty());
        assert_eq!(
            s.tick(t0 + Duration::from_millis(2000)),
            vec![SessionEvent::CopiedReset]
        );
        assert!(!s.is_copied());
    }

    #[test]
    fn copy_again_extends_indicator() {
        let t0 = Instant::now();
        let mut s = session();
        let mut cb = FakeClipboard {
            fail: false,
            written: Vec::new(),
        };
        s.set(Field::BaseUrl, "shop.example");
        s.copy_url(&mut cb, t0).unwrap();
        s.copy_url(&mut cb, t0 + Duration::from_millis(1500)).unwrap();
        assert!(s.tick(t0 + Duration::from_millis(2000)).is_empty());
        assert!(s.is_copied());
    }

    #[test]
    fn copy_failure_leaves_flag_unset() {
        let mut s = session();
        let mut cb = FakeClipboard {
            fail: true,
            written: Vec::new(),
        };
        s.set(Field::BaseUrl, "shop.example");
        assert!(s.copy_url(&mut cb, Instant::now()).is_err());
        assert!(!s.is_copied());
        assert!(s.next_deadline().is_none());
    }

    #[test]
    fn teardown_cancels_timers() {
        let t0 = Instant::now();
        let mut s = session();
        let mut cb = FakeClipboard {
            fail: false,
            written: Vec::new(),
        };
        s.set(Field::BaseUrl, "shop.example");
        s.generate(t0).unwrap();
        s.copy_url(&mut cb, t0).unwrap();
        s.teardown();
        assert!(s.tick(t0 + Duration::from_secs(10)).is_empty());
        assert!(s.is_copied());
    }

    #[test]
    fn parses_field_names() {
        assert_eq!("base".parse::<Field>(), Ok(Field::BaseUrl));
        assert_eq!("utm_campaign".parse::<Field>(), Ok(Field::Campaign));
        let err = "term".parse::<Field>().unwrap_err();
        assert_eq!(err, UnknownField("term".to_string()));
        assert_eq!(err.to_string(), r#"unknown field "term""#);
    }
}
