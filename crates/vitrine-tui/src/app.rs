use std::sync::Arc;
use std::time::Duration;

use ratatui::layout::Rect;
use tracing::info;
use vitrine_core::diagnostics::{DiagnosticWindow, TelemetryFeed};
use vitrine_core::form::{Field, Form};
use vitrine_core::magnet::Magnet;
use vitrine_core::pointer::PointerTrail;
use vitrine_core::scene::Scene;
use vitrine_core::{
    AppConfig, Carousel, Channel, Easing, LoadSequence, Mark, ScopeId, Stage, Trigger, Tween,
};

use crate::content;
use crate::input::Action;
use crate::page::{PageLayout, Section};
use crate::sections;
use crate::theme::Theme;

// Hero entrance, measured from page mount
const HERO_CANVAS_DELAY: Duration = Duration::from_millis(500);
const HERO_CANVAS_FADE: Duration = Duration::from_millis(1500);
const HERO_TEXT_DELAY: Duration = Duration::from_millis(1000);
const HERO_TEXT_STAGGER: Duration = Duration::from_millis(120);
const HERO_TEXT_RISE: Duration = Duration::from_millis(1000);

// Dashboard scrub windows, in viewport fractions past the section top
const BAR_WINDOW_START: f64 = 0.08;
const BAR_WINDOW_END: f64 = 0.12;
// The capture form reveals over the second half of the pinned range
const FORM_REVEAL_START: f64 = 0.25;
const FORM_REVEAL_END: f64 = 0.5;

// Feature cards and the signal sweep
const CARD_RISE: Duration = Duration::from_millis(800);
const CARD_STAGGER: Duration = Duration::from_millis(150);
const SIGNAL_SWEEP: Duration = Duration::from_millis(2000);

// Philosophy reveal
const WORD_RISE: Duration = Duration::from_millis(1000);
const WORD_STAGGER: Duration = Duration::from_millis(40);
/// Parallax drift across the section's full traversal, as a fraction of
/// its height
const DRIFT_FRACTION: f64 = 0.2;

// Panel entrances
const ACCOUNT_RISE: Duration = Duration::from_millis(800);
const CTA_RISE: Duration = Duration::from_millis(1000);

/// Top-level application phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Boot diagnostic playing before the page is revealed
    Loading,
    /// The scrollable page
    Page,
}

/// Which account panel is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountVariant {
    SignIn,
    Register,
}

/// Which form owns the keyboard while editing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Priority,
    Account,
}

/// Channels driving the hero entrance
pub struct HeroChannels {
    pub scope: ScopeId,
    pub canvas: Channel,
    pub brand: Channel,
    pub headline: Channel,
    pub copy: Channel,
    pub button: Channel,
}

/// Scroll-scrubbed channels for the pinned dashboard
pub struct DashboardChannels {
    pub scope: ScopeId,
    pub bars: Vec<Channel>,
    pub form: Channel,
}

/// Feature card entrances and the signal sweep
pub struct FeatureChannels {
    pub scope: ScopeId,
    pub cards: Vec<Channel>,
    pub signal: Channel,
}

/// Philosophy parallax drift and the word reveal
pub struct PhilosophyChannels {
    pub scope: ScopeId,
    pub drift: Channel,
    pub words: Vec<Channel>,
}

pub struct AccountChannels {
    pub scope: ScopeId,
    pub panel: Channel,
}

pub struct CtaChannels {
    pub scope: ScopeId,
    pub panel: Channel,
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Color palette
    pub theme: Theme,
    /// Current application phase
    pub phase: Phase,
    /// Animation clock, scroll position, and channel scopes
    pub stage: Stage,
    /// Section row grid for the current terminal size
    pub layout: PageLayout,
    /// Boot sequence; consumed on teardown
    pub loader: Option<LoadSequence>,
    /// Hero torus model
    pub scene: Scene,
    /// Dot/ring pointer follower
    pub trail: PointerTrail,
    /// Typewriter telemetry line in the features section
    pub feed: TelemetryFeed,
    /// Rotating diagnostic window in the features section
    pub diagnostics: DiagnosticWindow,
    /// Testimonial slide state
    pub carousel: Carousel,
    /// Lead capture form on the dashboard
    pub priority_form: Form,
    /// Sign-in / register form
    pub account_form: Form,
    /// Which account panel is active
    pub account_variant: AccountVariant,
    /// Form currently holding the keyboard, if any
    pub editing: Option<EditTarget>,
    /// Entrance and scrub channels; absent sections render settled
    pub hero: Option<HeroChannels>,
    pub dashboard: Option<DashboardChannels>,
    pub features: Option<FeatureChannels>,
    pub philosophy: Option<PhilosophyChannels>,
    pub account: Option<AccountChannels>,
    pub cta: Option<CtaChannels>,
    /// Magnetic pull on the hero call to action
    pub hero_magnet: Magnet,
    /// Magnetic pull on the closing call to action
    pub cta_magnet: Magnet,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Pending key for multi-key sequences (e.g., 'gg')
    pub pending_key: Option<char>,
}

impl App {
    /// Build the application for a terminal of the given size.
    /// `input_available` is false when mouse capture is off; the pointer
    /// overlay then disables itself.
    pub fn new(
        config: Arc<AppConfig>,
        theme: Theme,
        width: u16,
        height: u16,
        input_available: bool,
    ) -> Self {
        let reduced = config.ui.reduced_motion;
        let layout = PageLayout::compute(width, height);

        let mut scroll_config = config.scroll.clone();
        if reduced {
            scroll_config.smooth_enabled = false;
        }
        let mut stage = Stage::new(scroll_config, height);
        stage.set_max_scroll(layout.max_scroll());

        let loader = (config.loader.enabled && !reduced)
            .then(|| LoadSequence::new(config.loader.completion, config.loader.time_scale));
        let phase = if loader.is_some() {
            Phase::Loading
        } else {
            Phase::Page
        };

        let now = stage.now();
        let mut app = Self {
            trail: PointerTrail::new(&config.overlay, input_available),
            scene: Scene::new(reduced),
            feed: TelemetryFeed::new(
                content::TELEMETRY_MESSAGES
                    .iter()
                    .map(|m| m.to_string())
                    .collect(),
                now,
            ),
            diagnostics: DiagnosticWindow::new(content::DIAGNOSTIC_ROWS.len(), now),
            carousel: Carousel::new(content::TESTIMONIALS.len()),
            priority_form: priority_form(),
            account_form: account_form(AccountVariant::SignIn),
            account_variant: AccountVariant::SignIn,
            editing: None,
            hero: None,
            dashboard: None,
            features: None,
            philosophy: None,
            account: None,
            cta: None,
            hero_magnet: Magnet::new(),
            cta_magnet: Magnet::new(),
            should_quit: false,
            pending_key: None,
            config,
            theme,
            phase,
            stage,
            layout,
            loader,
        };
        if let Some(loader) = &mut app.loader {
            loader.begin(now);
        }
        if app.phase == Phase::Page {
            app.mount_page();
        }
        app
    }

    /// Drive every animated model forward by one frame
    pub fn advance(&mut self, dt: Duration) {
        self.stage.advance(dt);
        let now = self.stage.now();
        self.trail.advance();
        match self.phase {
            Phase::Loading => {
                let done = match &mut self.loader {
                    Some(loader) => loader.poll_complete(now),
                    None => true,
                };
                if done {
                    self.loader = None;
                    self.phase = Phase::Page;
                    self.mount_page();
                }
            }
            Phase::Page => {
                self.scene.advance();
                self.feed.advance(now);
                self.diagnostics.advance(now);
                self.carousel.advance(now);
            }
        }
    }

    /// Apply an action to the application state
    pub fn apply(&mut self, action: Action) {
        // Any other action clears a pending 'gg'
        if action != Action::PendingG {
            self.pending_key = None;
        }
        match action {
            Action::Quit => self.should_quit = true,
            Action::SkipLoader => self.skip_loader(),
            Action::ScrollDown => self.stage.scroll_line_down(),
            Action::ScrollUp => self.stage.scroll_line_up(),
            Action::ScrollHalfPageDown => self.stage.scroll_half_page_down(),
            Action::ScrollHalfPageUp => self.stage.scroll_half_page_up(),
            Action::ScrollPageDown => self.stage.scroll_full_page_down(),
            Action::ScrollPageUp => self.stage.scroll_full_page_up(),
            Action::JumpToTop => self.stage.jump_top(),
            Action::JumpToBottom => self.stage.jump_bottom(),
            Action::PendingG => self.pending_key = Some('g'),
            Action::NextSlide => {
                self.carousel.next(self.stage.now());
            }
            Action::PrevSlide => {
                self.carousel.previous(self.stage.now());
            }
            Action::BeginEdit => self.begin_edit(),
            Action::ExitEdit => self.editing = None,
            Action::NextField => self.with_focused_form(|form| form.focus_next()),
            Action::PrevField => self.with_focused_form(|form| form.focus_previous()),
            Action::Confirm => self.confirm(),
            Action::ToggleAccountVariant => self.toggle_account_variant(),
            Action::InputChar(c) => self.with_focused_form(|form| form.input(c)),
            Action::Backspace => self.with_focused_form(|form| form.backspace()),
            Action::PointerMove(column, row) => self.pointer_move(column, row),
            Action::PointerPress(column, row) => self.pointer_press(column, row),
            Action::PointerRelease => {
                let now = self.stage.now();
                self.trail.on_release(now);
            }
            Action::WheelUp => self.stage.scroll_line_up(),
            Action::WheelDown => self.stage.scroll_line_down(),
            Action::None => {}
        }
    }

    /// Recompute the row grid for a new terminal size
    ///
    /// Scopes are re-anchored in place: entrances that have played do not
    /// replay, scrubbed channels resolve against the new geometry.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.layout = PageLayout::compute(width, height);
        self.stage.set_viewport(height);
        self.stage.set_max_scroll(self.layout.max_scroll());
        if let Some(hero) = &self.hero {
            self.stage.rebase(hero.scope, self.layout.anchor(Section::Hero));
        }
        if let Some(dashboard) = &self.dashboard {
            self.stage
                .rebase(dashboard.scope, self.layout.anchor(Section::Dashboard));
        }
        if let Some(features) = &self.features {
            self.stage
                .rebase(features.scope, self.layout.anchor(Section::Features));
        }
        if let Some(philosophy) = &self.philosophy {
            self.stage
                .rebase(philosophy.scope, self.layout.anchor(Section::Philosophy));
        }
        if let Some(account) = &self.account {
            self.stage
                .rebase(account.scope, self.layout.anchor(Section::Account));
        }
        if let Some(cta) = &self.cta {
            self.stage.rebase(cta.scope, self.layout.anchor(Section::Cta));
        }
    }

    /// Whether the next frame should come on the animation cadence
    pub fn needs_fast_update(&self) -> bool {
        let now = self.stage.now();
        if self.trail.needs_frame(now) {
            return true;
        }
        match self.phase {
            Phase::Loading => self
                .loader
                .as_ref()
                .map(|loader| loader.needs_frame())
                .unwrap_or(false),
            Phase::Page => {
                self.stage.needs_frame()
                    || self.carousel.needs_frame()
                    || self.hero_magnet.needs_frame(now)
                    || self.cta_magnet.needs_frame(now)
                    || (self.section_on_screen(Section::Hero) && self.scene.is_animated())
                    || (self.section_on_screen(Section::Features)
                        && (self.feed.status() != vitrine_core::diagnostics::FeedStatus::Live
                            || self.diagnostics.needs_frame(now)))
            }
        }
    }

    /// Whether any row of a section is currently on screen
    pub fn section_on_screen(&self, section: Section) -> bool {
        self.phase == Phase::Page && self.layout.is_visible(section, self.stage.scroll_offset())
    }

    /// Whether a form field currently captures the keyboard
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// The form a `BeginEdit` would focus, if an editable one is on screen
    pub fn form_target(&self) -> Option<EditTarget> {
        if self.section_on_screen(Section::Dashboard) && !self.priority_form.is_submitted() {
            return Some(EditTarget::Priority);
        }
        if self.section_on_screen(Section::Account) && !self.account_form.is_submitted() {
            return Some(EditTarget::Account);
        }
        None
    }

    /// Sample a channel, falling back when it is absent or its scope is
    /// gone
    pub fn channel_or(&self, channel: Option<Channel>, fallback: f64) -> f64 {
        channel
            .and_then(|c| self.stage.value(c))
            .unwrap_or(fallback)
    }

    /// Tear the boot sequence down early, honoring its completion policy
    fn skip_loader(&mut self) {
        if let Some(loader) = self.loader.take() {
            let delivered = loader.teardown();
            info!(delivered, "loading sequence skipped");
            self.phase = Phase::Page;
            if delivered {
                self.mount_page();
            }
        }
    }

    /// Attach the entrance and scroll channels for every section. With
    /// reduced motion the channels stay absent and the page renders
    /// settled.
    fn mount_page(&mut self) {
        if self.config.ui.reduced_motion {
            return;
        }
        self.hero = self.mount_hero();
        self.dashboard = self.mount_dashboard();
        self.features = self.mount_features();
        self.philosophy = self.mount_philosophy();
        self.account = self.mount_account();
        self.cta = self.mount_cta();
    }

    fn mount_hero(&mut self) -> Option<HeroChannels> {
        let scope = self.stage.acquire(self.layout.anchor(Section::Hero));
        let canvas = self.stage.add(
            scope,
            Tween::new(0.0, 1.0, HERO_CANVAS_FADE).ease(Easing::CubicOut),
            Trigger::mount_after(HERO_CANVAS_DELAY),
        )?;
        let text = Tween::new(0.0, 1.0, HERO_TEXT_RISE).ease(Easing::QuartOut);
        let brand = self
            .stage
            .add(scope, text, Trigger::mount_after(HERO_TEXT_DELAY))?;
        let headline = self.stage.add(
            scope,
            text,
            Trigger::mount_after(HERO_TEXT_DELAY + HERO_TEXT_STAGGER),
        )?;
        let copy = self.stage.add(
            scope,
            text,
            Trigger::mount_after(HERO_TEXT_DELAY + HERO_TEXT_STAGGER * 2),
        )?;
        let button = self.stage.add(
            scope,
            text,
            Trigger::mount_after(HERO_TEXT_DELAY + HERO_TEXT_STAGGER * 3),
        )?;
        Some(HeroChannels {
            scope,
            canvas,
            brand,
            headline,
            copy,
            button,
        })
    }

    fn mount_dashboard(&mut self) -> Option<DashboardChannels> {
        let scope = self.stage.acquire(self.layout.anchor(Section::Dashboard));
        let mut bars = Vec::with_capacity(content::DASHBOARD_BARS.len());
        for i in 0..content::DASHBOARD_BARS.len() {
            bars.push(self.stage.add(
                scope,
                Tween::new(0.0, 1.0, Duration::ZERO),
                Trigger::scrub(
                    Mark::viewport(BAR_WINDOW_START * i as f64),
                    Mark::viewport(BAR_WINDOW_END * (i + 1) as f64),
                ),
            )?);
        }
        let form = self.stage.add(
            scope,
            Tween::new(0.0, 1.0, Duration::ZERO).ease(Easing::QuartOut),
            Trigger::scrub(
                Mark::viewport(FORM_REVEAL_START),
                Mark::viewport(FORM_REVEAL_END),
            ),
        )?;
        Some(DashboardChannels { scope, bars, form })
    }

    fn mount_features(&mut self) -> Option<FeatureChannels> {
        let scope = self.stage.acquire(self.layout.anchor(Section::Features));
        let mut cards = Vec::with_capacity(content::FEATURE_CARDS.len());
        for i in 0..content::FEATURE_CARDS.len() {
            cards.push(self.stage.add(
                scope,
                Tween::new(0.0, 1.0, CARD_RISE)
                    .ease(Easing::QuartOut)
                    .delay(CARD_STAGGER * i as u32),
                Trigger::enter(0.75),
            )?);
        }
        let signal = self.stage.add(
            scope,
            Tween::new(0.0, 1.0, SIGNAL_SWEEP).ease(Easing::CubicInOut),
            Trigger::enter(0.8),
        )?;
        Some(FeatureChannels {
            scope,
            cards,
            signal,
        })
    }

    fn mount_philosophy(&mut self) -> Option<PhilosophyChannels> {
        let slot = self.layout.slot(Section::Philosophy);
        let scope = self.stage.acquire(slot.top);
        // Drift runs from the section entering at the bottom edge until its
        // bottom clears the top edge
        let drift = self.stage.add(
            scope,
            Tween::new(0.0, slot.height as f64 * DRIFT_FRACTION, Duration::ZERO),
            Trigger::scrub(Mark::viewport(-1.0), Mark::new(slot.height as i32, 0.0)),
        )?;
        // The three lead words and the joining word animate; the accent
        // spans and the aside stay put
        let mut words = Vec::with_capacity(content::PHILOSOPHY_LEAD.len() + 1);
        for i in 0..content::PHILOSOPHY_LEAD.len() + 1 {
            words.push(self.stage.add(
                scope,
                Tween::new(0.0, 1.0, WORD_RISE)
                    .ease(Easing::QuartOut)
                    .delay(WORD_STAGGER * i as u32),
                Trigger::enter(0.8),
            )?);
        }
        Some(PhilosophyChannels {
            scope,
            drift,
            words,
        })
    }

    fn mount_account(&mut self) -> Option<AccountChannels> {
        let scope = self.stage.acquire(self.layout.anchor(Section::Account));
        let panel = self.stage.add(
            scope,
            Tween::new(0.0, 1.0, ACCOUNT_RISE).ease(Easing::CubicOut),
            Trigger::enter(0.8),
        )?;
        Some(AccountChannels { scope, panel })
    }

    fn mount_cta(&mut self) -> Option<CtaChannels> {
        let scope = self.stage.acquire(self.layout.anchor(Section::Cta));
        let panel = self.stage.add(
            scope,
            Tween::new(0.0, 1.0, CTA_RISE).ease(Easing::QuartOut),
            Trigger::enter(0.85),
        )?;
        Some(CtaChannels { scope, panel })
    }

    fn begin_edit(&mut self) {
        if let Some(target) = self.form_target() {
            self.editing = Some(target);
        }
    }

    fn focused_form_mut(&mut self) -> Option<&mut Form> {
        match self.editing {
            Some(EditTarget::Priority) => Some(&mut self.priority_form),
            Some(EditTarget::Account) => Some(&mut self.account_form),
            None => None,
        }
    }

    fn with_focused_form(&mut self, apply: impl FnOnce(&mut Form)) {
        if let Some(form) = self.focused_form_mut() {
            apply(form);
        }
    }

    /// Enter advances through the fields and submits from the last one
    fn confirm(&mut self) {
        let form = match self.focused_form_mut() {
            Some(form) => form,
            None => return,
        };
        if form.focus() + 1 < form.fields().len() {
            form.focus_next();
            return;
        }
        if form.submit() {
            self.editing = None;
        }
    }

    /// Swap the sign-in and register panels, rebuilding the form
    fn toggle_account_variant(&mut self) {
        if self.account_form.is_submitted() {
            return;
        }
        self.account_variant = match self.account_variant {
            AccountVariant::SignIn => AccountVariant::Register,
            AccountVariant::Register => AccountVariant::SignIn,
        };
        self.account_form = account_form(self.account_variant);
    }

    fn pointer_move(&mut self, column: u16, row: u16) {
        self.trail.on_move(column, row);
        if self.phase != Phase::Page {
            return;
        }
        self.update_scene_tilt(column, row);
        self.update_magnets(column, row);
    }

    /// Aim the torus tilt at the pointer while the hero is on screen
    fn update_scene_tilt(&mut self, column: u16, row: u16) {
        if !self.section_on_screen(Section::Hero) {
            self.scene.clear_pointer();
            return;
        }
        let width = self.layout.width.max(1) as f64;
        let height = self.stage.viewport().max(1) as f64;
        let nx = column as f64 / width * 2.0 - 1.0;
        let ny = row as f64 / height * 2.0 - 1.0;
        self.scene.set_pointer(nx, ny);
    }

    /// Pull the call-to-action labels toward a hovering pointer. Hit
    /// zones sit at the settled button positions.
    fn update_magnets(&mut self, column: u16, row: u16) {
        let now = self.stage.now();
        match sections::hero::button_rect(self) {
            Some(rect) if rect_contains(rect, column, row) => {
                let (dx, dy) = center_offset(rect, column, row);
                self.hero_magnet.attract(dx, dy, now);
            }
            _ => self.hero_magnet.release(now),
        }
        match sections::cta::button_rect(self) {
            Some(rect) if rect_contains(rect, column, row) => {
                let (dx, dy) = center_offset(rect, column, row);
                self.cta_magnet.attract(dx, dy, now);
            }
            _ => self.cta_magnet.release(now),
        }
    }

    fn pointer_press(&mut self, column: u16, row: u16) {
        let now = self.stage.now();
        self.trail.on_press(now);
        if self.phase != Phase::Page {
            return;
        }
        if let Some(rect) = sections::hero::button_rect(self) {
            if rect_contains(rect, column, row) {
                // The hero call to action leads into the collection
                self.stage.scroll_to(self.layout.anchor(Section::Dashboard));
                return;
            }
        }
        if let Some(rect) = sections::cta::button_rect(self) {
            if rect_contains(rect, column, row) {
                self.stage.jump_top();
                return;
            }
        }
        if let Some((left, right)) = sections::testimonials::arrow_rects(self) {
            if rect_contains(left, column, row) {
                self.carousel.previous(now);
                return;
            }
            if rect_contains(right, column, row) {
                self.carousel.next(now);
                return;
            }
        }
        if let Some(rect) = sections::account::toggle_rect(self) {
            if rect_contains(rect, column, row) {
                self.toggle_account_variant();
            }
        }
    }
}

/// The dashboard lead capture form
fn priority_form() -> Form {
    Form::new(
        "priority access",
        vec![
            Field::required(
                content::PRIORITY_NAME_LABEL,
                content::PRIORITY_NAME_PLACEHOLDER,
            ),
            Field::required(
                content::PRIORITY_EMAIL_LABEL,
                content::PRIORITY_EMAIL_PLACEHOLDER,
            ),
        ],
    )
}

/// The account form for the active panel variant
fn account_form(variant: AccountVariant) -> Form {
    match variant {
        AccountVariant::SignIn => Form::new(
            "sign in",
            vec![
                Field::required(
                    content::ACCOUNT_EMAIL_LABEL,
                    content::ACCOUNT_EMAIL_PLACEHOLDER,
                ),
                Field::secret(
                    content::ACCOUNT_PASSWORD_LABEL,
                    content::ACCOUNT_PASSWORD_PLACEHOLDER,
                ),
            ],
        ),
        AccountVariant::Register => Form::new(
            "register",
            vec![
                Field::required(
                    content::ACCOUNT_NAME_LABEL,
                    content::ACCOUNT_NAME_PLACEHOLDER,
                ),
                Field::required(
                    content::ACCOUNT_EMAIL_LABEL,
                    content::ACCOUNT_EMAIL_PLACEHOLDER,
                ),
                Field::secret(
                    content::ACCOUNT_PASSWORD_LABEL,
                    content::ACCOUNT_PASSWORD_PLACEHOLDER,
                ),
            ],
        ),
    }
}

fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x + rect.width
        && row >= rect.y
        && row < rect.y + rect.height
}

/// Pointer offset from a rect's center, in cells
fn center_offset(rect: Rect, column: u16, row: u16) -> (f64, f64) {
    let cx = rect.x as f64 + rect.width as f64 / 2.0;
    let cy = rect.y as f64 + rect.height as f64 / 2.0;
    (column as f64 - cx, row as f64 - cy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent};
    use vitrine_core::CompletionPolicy;

    use crate::input::handle_key_event;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn test_app() -> App {
        App::new(Arc::new(AppConfig::default()), Theme::default(), 100, 40, true)
    }

    /// Boot the app and run the loading sequence to completion
    fn booted_app() -> App {
        let mut app = test_app();
        app.advance(ms(4_000));
        assert_eq!(app.phase, Phase::Page);
        app
    }

    /// Scroll to a row and let the smooth animation settle
    fn settle_scroll(app: &mut App, row: u16) {
        app.stage.scroll_to(row);
        app.advance(ms(2_000));
    }

    #[test]
    fn test_boot_runs_loader_then_mounts_page() {
        let mut app = test_app();
        assert_eq!(app.phase, Phase::Loading);
        assert!(app.loader.is_some());

        app.advance(ms(1_000));
        assert_eq!(app.phase, Phase::Loading);

        app.advance(ms(3_000));
        assert_eq!(app.phase, Phase::Page);
        assert!(app.loader.is_none());
        assert!(app.hero.is_some());
        assert!(app.dashboard.is_some());
    }

    #[test]
    fn test_skip_with_abandon_renders_settled() {
        let mut app = test_app();
        app.advance(ms(500));
        app.apply(Action::SkipLoader);

        assert_eq!(app.phase, Phase::Page);
        assert!(app.hero.is_none());
        // Settled reads: entrances at rest, bars full
        assert_eq!(app.channel_or(app.hero.as_ref().map(|h| h.brand), 1.0), 1.0);
    }

    #[test]
    fn test_skip_with_deliver_plays_entrances() {
        let mut config = AppConfig::default();
        config.loader.completion = CompletionPolicy::Deliver;
        let mut app = App::new(Arc::new(config), Theme::default(), 100, 40, true);

        app.advance(ms(500));
        app.apply(Action::SkipLoader);

        assert_eq!(app.phase, Phase::Page);
        let hero = app.hero.as_ref().expect("entrances mounted");
        // Freshly armed: the brand line starts hidden
        assert_eq!(app.stage.value(hero.brand), Some(0.0));
    }

    #[test]
    fn test_reduced_motion_skips_loader_and_channels() {
        let mut config = AppConfig::default();
        config.ui.reduced_motion = true;
        let app = App::new(Arc::new(config), Theme::default(), 100, 40, true);

        assert_eq!(app.phase, Phase::Page);
        assert!(app.loader.is_none());
        assert!(app.hero.is_none());
        assert!(!app.scene.is_animated());
    }

    #[test]
    fn test_hero_entrance_plays_out() {
        let mut app = booted_app();
        let brand = app.hero.as_ref().map(|h| h.brand);
        assert_eq!(app.channel_or(brand, 1.0), 0.0);

        app.advance(ms(3_000));
        assert!((app.channel_or(brand, 0.0) - 1.0).abs() < 1e-9);
        let canvas = app.hero.as_ref().map(|h| h.canvas);
        assert!((app.channel_or(canvas, 0.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_bars_scrub_with_scroll() {
        let mut app = booted_app();
        let anchor = app.layout.anchor(Section::Dashboard);
        let bars: Vec<_> = app
            .dashboard
            .as_ref()
            .map(|d| d.bars.clone())
            .expect("dashboard channels");

        // Before the pin nothing has filled
        assert_eq!(app.channel_or(bars.first().copied(), 1.0), 0.0);

        // Part way into the pin the first bar is full, the last still empty
        settle_scroll(&mut app, anchor + 6);
        assert!((app.channel_or(bars.first().copied(), 0.0) - 1.0).abs() < 1e-9);
        assert_eq!(app.channel_or(bars.last().copied(), 1.0), 0.0);

        // Deep into the section every window has closed
        let deep = anchor + app.stage.viewport();
        settle_scroll(&mut app, deep);
        for bar in &bars {
            assert!((app.channel_or(Some(*bar), 0.0) - 1.0).abs() < 1e-9);
        }

        // Scrolling back re-empties; scrubbed channels track both ways
        settle_scroll(&mut app, anchor);
        assert_eq!(app.channel_or(bars.last().copied(), 1.0), 0.0);
    }

    #[test]
    fn test_form_reveal_follows_pin() {
        let mut app = booted_app();
        let anchor = app.layout.anchor(Section::Dashboard);
        let form = app.dashboard.as_ref().map(|d| d.form);

        settle_scroll(&mut app, anchor);
        assert_eq!(app.channel_or(form, 1.0), 0.0);

        // Past the pinned range the form has fully revealed
        let past_pin = anchor + app.stage.viewport() / 2 + 1;
        settle_scroll(&mut app, past_pin);
        assert!((app.channel_or(form, 0.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_priority_form_flow() {
        let mut app = booted_app();
        let anchor = app.layout.anchor(Section::Dashboard);
        settle_scroll(&mut app, anchor);
        assert_eq!(app.form_target(), Some(EditTarget::Priority));

        app.apply(Action::BeginEdit);
        assert!(app.is_editing());

        for c in "Jane".chars() {
            app.apply(Action::InputChar(c));
        }
        app.apply(Action::Confirm);
        assert_eq!(app.priority_form.focus(), 1);

        for c in "jane@example.com".chars() {
            app.apply(Action::InputChar(c));
        }
        app.apply(Action::Confirm);

        assert!(app.priority_form.is_submitted());
        assert!(!app.is_editing());
        // A submitted form no longer offers editing
        assert_eq!(app.form_target(), None);
    }

    #[test]
    fn test_submit_with_blank_field_stays_editing() {
        let mut app = booted_app();
        let anchor = app.layout.anchor(Section::Dashboard);
        settle_scroll(&mut app, anchor);
        app.apply(Action::BeginEdit);

        app.apply(Action::NextField);
        app.apply(Action::Confirm);

        assert!(!app.priority_form.is_submitted());
        assert!(app.is_editing());
        assert!(app.priority_form.fields()[0].missing);
    }

    #[test]
    fn test_account_variant_toggle_rebuilds_form() {
        let mut app = booted_app();
        assert_eq!(app.account_form.fields().len(), 2);

        app.apply(Action::ToggleAccountVariant);
        assert_eq!(app.account_variant, AccountVariant::Register);
        assert_eq!(app.account_form.fields().len(), 3);

        app.apply(Action::ToggleAccountVariant);
        assert_eq!(app.account_variant, AccountVariant::SignIn);
        assert_eq!(app.account_form.fields().len(), 2);
    }

    #[test]
    fn test_carousel_advances_on_slide_actions() {
        let mut app = booted_app();
        let anchor = app.layout.anchor(Section::Testimonials);
        settle_scroll(&mut app, anchor);
        assert_eq!(app.carousel.index(), 0);

        app.apply(Action::NextSlide);
        assert!(!app.carousel.is_idle());
        app.advance(ms(1_000));
        assert_eq!(app.carousel.index(), 1);
    }

    #[test]
    fn test_resize_rebases_live_scopes() {
        let mut app = booted_app();
        settle_scroll(&mut app, 10);
        app.handle_resize(120, 50);

        assert_eq!(app.stage.viewport(), 50);
        assert_eq!(app.stage.max_scroll(), app.layout.max_scroll());
        // Channels survive the resize
        let hero = app.hero.as_ref().expect("hero channels");
        assert!(app.stage.value(hero.brand).is_some());
        let dashboard = app.dashboard.as_ref().expect("dashboard channels");
        assert!(app.stage.value(dashboard.bars[0]).is_some());
    }

    #[test]
    fn test_hero_button_press_scrolls_to_dashboard() {
        let mut app = booted_app();
        app.advance(ms(3_000));
        let rect = sections::hero::button_rect(&app).expect("button on screen");

        app.apply(Action::PointerPress(
            rect.x + rect.width / 2,
            rect.y + rect.height / 2,
        ));
        app.advance(ms(3_000));
        assert_eq!(
            app.stage.scroll_offset(),
            app.layout.anchor(Section::Dashboard)
        );
    }

    #[test]
    fn test_gg_jumps_to_top() {
        let mut app = booted_app();
        settle_scroll(&mut app, 50);
        assert_eq!(app.stage.scroll_offset(), 50);

        let g = KeyEvent::from(KeyCode::Char('g'));
        let action = handle_key_event(g, &app);
        assert_eq!(action, Action::PendingG);
        app.apply(action);

        let action = handle_key_event(g, &app);
        assert_eq!(action, Action::JumpToTop);
        app.apply(action);
        app.advance(ms(2_000));
        assert_eq!(app.stage.scroll_offset(), 0);
    }

    #[test]
    fn test_editing_captures_keys() {
        let mut app = booted_app();
        let anchor = app.layout.anchor(Section::Dashboard);
        settle_scroll(&mut app, anchor);
        app.apply(Action::BeginEdit);

        // 'q' types rather than quits while a field has focus
        let action = handle_key_event(KeyEvent::from(KeyCode::Char('q')), &app);
        assert_eq!(action, Action::InputChar('q'));

        let action = handle_key_event(KeyEvent::from(KeyCode::Esc), &app);
        assert_eq!(action, Action::ExitEdit);
    }

    #[test]
    fn test_loading_phase_keys() {
        let app = test_app();
        let action = handle_key_event(KeyEvent::from(KeyCode::Enter), &app);
        assert_eq!(action, Action::SkipLoader);
        let action = handle_key_event(KeyEvent::from(KeyCode::Char('j')), &app);
        assert_eq!(action, Action::None);
    }

    #[test]
    fn test_wheel_scrolls_page() {
        let mut app = booted_app();
        app.apply(Action::WheelDown);
        app.advance(ms(2_000));
        assert!(app.stage.scroll_offset() > 0);

        let offset = app.stage.scroll_offset();
        app.apply(Action::WheelUp);
        app.advance(ms(2_000));
        assert!(app.stage.scroll_offset() < offset);
    }
}
