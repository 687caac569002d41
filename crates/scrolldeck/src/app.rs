use eframe::egui;
use std::time::Instant;

use scrolldeck::nav::widgets::{HintSegment, Widgets};
use scrolldeck::nav::{
    Fullscreen, FullscreenError, Key, Location, ScrollBehavior, SlideController, SlideState,
    SlideSurface, Viewport,
};

use crate::cli::Launch;
use crate::deck::{Deck, SlideText};
use crate::theme::Theme;

/// Share of the remaining distance covered per frame while smooth scrolling.
const SCROLL_EASE: f32 = 0.18;
const SCROLL_SNAP_EPSILON: f32 = 0.5;
const PROGRESS_HEIGHT: f32 = 4.0;
const DOT_RADIUS: f32 = 5.0;
const DOT_SPACING: f32 = 20.0;
const CHROME_MARGIN: f32 = 20.0;
const BUTTON_SIZE: f32 = 36.0;
/// Offsets below this are treated as unchanged when detecting scroll events.
const OFFSET_EPSILON: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
enum ScrollStep {
    Idle,
    Moved,
    Arrived,
    /// A user scroll cut the smooth scroll short.
    Interrupted,
}

/// The scroll container, slide flags and location of the presentation window.
struct EguiHost {
    ctx: egui::Context,
    title: String,
    slides: Vec<SlideState>,
    offset: f32,
    target: Option<f32>,
    interrupted: bool,
    extent: f32,
    fragment: Option<String>,
}

impl EguiHost {
    fn new(ctx: egui::Context, title: String, count: usize, fragment: Option<String>) -> Self {
        Self {
            ctx,
            title,
            slides: vec![SlideState::default(); count],
            offset: 0.0,
            target: None,
            interrupted: false,
            extent: 720.0,
            fragment,
        }
    }

    fn max_offset(&self) -> f32 {
        self.slides.len().saturating_sub(1) as f32 * self.extent
    }

    fn reported_fullscreen(&self) -> Option<bool> {
        self.ctx.input(|i| i.viewport().fullscreen)
    }

    fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    /// User-driven scroll (wheel/trackpad). Interrupts any smooth scroll;
    /// the next [`step_scroll`](Self::step_scroll) reports it.
    fn scroll_by(&mut self, delta: f32) {
        self.interrupted |= self.target.take().is_some();
        self.offset = (self.offset + delta).clamp(0.0, self.max_offset());
    }

    fn step_scroll(&mut self) -> ScrollStep {
        if std::mem::take(&mut self.interrupted) {
            return ScrollStep::Interrupted;
        }
        let Some(target) = self.target else {
            return ScrollStep::Idle;
        };
        let diff = target - self.offset;
        if diff.abs() < SCROLL_SNAP_EPSILON {
            self.offset = target;
            self.target = None;
            ScrollStep::Arrived
        } else {
            self.offset += diff * SCROLL_EASE;
            ScrollStep::Moved
        }
    }
}

impl Viewport for EguiHost {
    fn scroll_offset(&self) -> f32 {
        self.offset
    }

    fn viewport_extent(&self) -> f32 {
        self.extent
    }

    fn scroll_to(&mut self, offset: f32, behavior: ScrollBehavior) {
        let offset = offset.clamp(0.0, self.max_offset());
        match behavior {
            ScrollBehavior::Smooth => {
                self.interrupted = false;
                self.target = Some(offset);
            }
            ScrollBehavior::Instant => {
                self.interrupted = false;
                self.target = None;
                self.offset = offset;
            }
        }
        self.ctx.request_repaint();
    }

    fn reports_scroll_completion(&self) -> bool {
        true
    }
}

impl Location for EguiHost {
    fn fragment(&self) -> Option<String> {
        self.fragment.clone()
    }

    fn replace_fragment(&mut self, fragment: &str) {
        self.fragment = Some(fragment.to_string());
        self.ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!(
            "{} {fragment}",
            self.title
        )));
    }
}

impl SlideSurface for EguiHost {
    fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn set_slide_state(&mut self, index: usize, state: SlideState) {
        if let Some(slot) = self.slides.get_mut(index) {
            *slot = state;
        }
    }
}

impl Fullscreen for EguiHost {
    fn is_fullscreen(&self) -> bool {
        self.reported_fullscreen().unwrap_or(false)
    }

    fn request_fullscreen(&mut self) -> Result<(), FullscreenError> {
        fullscreen_state(self.reported_fullscreen())?;
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Fullscreen(true));
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), FullscreenError> {
        fullscreen_state(self.reported_fullscreen())?;
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Fullscreen(false));
        Ok(())
    }
}

/// Raw input gathered inside `ctx.input`, dispatched afterwards.
#[derive(Debug, Clone, Copy)]
enum HostEvent {
    Key(Key),
    Wheel(f32),
    TouchStart(f32),
    TouchEnd(f32),
    Click(egui::Pos2),
    Quit,
}

struct PresentationApp {
    deck: Deck,
    theme: Theme,
    controller: SlideController<EguiHost>,
    last_reported_offset: f32,
    hidden: bool,
}

impl PresentationApp {
    fn new(ctx: egui::Context, title: String, deck: Deck, launch: Launch) -> Self {
        let host = EguiHost::new(ctx, title, deck.len(), launch.fragment);
        let controller = SlideController::init(host, launch.options);
        let last_reported_offset = controller.host().offset;
        Self {
            deck,
            theme: Theme::from_name(&launch.theme),
            controller,
            last_reported_offset,
            hidden: false,
        }
    }

    fn compute_scale(rect: egui::Rect) -> f32 {
        let ref_w = 1920.0;
        let ref_h = 1080.0;
        (rect.width() / ref_w).min(rect.height() / ref_h)
    }

    fn sync_extent(&mut self, rect: egui::Rect, now: Instant) {
        let extent = rect.height();
        if (self.controller.host().extent - extent).abs() > SCROLL_SNAP_EPSILON {
            self.controller.host_mut().extent = extent;
            self.controller.handle_resize(now);
        }
    }

    fn sync_visibility(&mut self, ctx: &egui::Context) {
        let hidden = ctx.input(|i| i.viewport().minimized.unwrap_or(false));
        if hidden != self.hidden {
            self.hidden = hidden;
            self.controller.handle_visibility_change(!hidden);
        }
    }

    fn collect_events(ctx: &egui::Context) -> Vec<HostEvent> {
        ctx.input(|i| {
            let mut events = Vec::new();
            for event in &i.events {
                match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } => {
                        if *key == egui::Key::Q {
                            events.push(HostEvent::Quit);
                        } else if let Some(key) = map_key(*key, modifiers) {
                            events.push(HostEvent::Key(key));
                        }
                    }
                    egui::Event::Touch { phase, pos, .. } => match phase {
                        egui::TouchPhase::Start => events.push(HostEvent::TouchStart(pos.y)),
                        egui::TouchPhase::End => events.push(HostEvent::TouchEnd(pos.y)),
                        _ => {}
                    },
                    _ => {}
                }
            }
            let wheel = i.smooth_scroll_delta.y;
            if wheel != 0.0 {
                events.push(HostEvent::Wheel(wheel));
            }
            if i.pointer.primary_clicked() {
                if let Some(pos) = i.pointer.interact_pos() {
                    events.push(HostEvent::Click(pos));
                }
            }
            events
        })
    }

    fn dispatch(&mut self, ctx: &egui::Context, rect: egui::Rect, event: HostEvent, now: Instant) {
        match event {
            HostEvent::Key(key) => {
                let outcome = self.controller.handle_key(key, now);
                tracing::trace!(?key, ?outcome, "key");
            }
            HostEvent::Wheel(delta) => self.controller.host_mut().scroll_by(-delta),
            HostEvent::TouchStart(y) => self.controller.touch_start(y),
            HostEvent::TouchEnd(y) => self.controller.touch_end(y, now),
            HostEvent::Click(pos) => self.handle_click(ctx, rect, pos, now),
            HostEvent::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
        }
    }

    fn handle_click(&mut self, ctx: &egui::Context, rect: egui::Rect, pos: egui::Pos2, now: Instant) {
        let widgets = self.controller.widgets();

        if widgets.fullscreen_button.is_some() && fullscreen_button_rect(rect).contains(pos) {
            self.controller.toggle_fullscreen();
            return;
        }

        if let Some(link) = &widgets.back_link {
            if back_link_rect(rect).contains(pos) {
                ctx.open_url(egui::OpenUrl::same_tab(link.href.clone()));
                return;
            }
        }

        if let Some(dots) = &widgets.dots {
            let count = dots.dots().len();
            let hit = (0..count)
                .find(|&i| dot_center(i, count, rect).distance(pos) <= DOT_RADIUS * 2.0);
            if let Some(index) = hit {
                self.controller.select_slide(index, now);
            }
        }
    }

    /// Report host-side scroll movement to the controller, the way a
    /// browser fires scroll events for both user and programmatic scrolls.
    fn advance_scroll(&mut self, now: Instant) {
        let step = self.controller.host_mut().step_scroll();
        let offset = self.controller.host().offset;
        if (offset - self.last_reported_offset).abs() > OFFSET_EPSILON {
            self.last_reported_offset = offset;
            self.controller.handle_scroll(now);
        }
        match step {
            ScrollStep::Arrived => self.controller.handle_scroll_complete(now),
            ScrollStep::Interrupted => self.controller.handle_scroll_interrupted(now),
            ScrollStep::Idle | ScrollStep::Moved => {}
        }
    }

    fn schedule_repaint(&self, ctx: &egui::Context, now: Instant) {
        if self.controller.host().is_animating() {
            ctx.request_repaint();
        } else if let Some(deadline) = self.controller.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }

    fn draw_slides(&self, ui: &egui::Ui, rect: egui::Rect, scale: f32) {
        let host = self.controller.host();
        let painter = ui.painter().with_clip_rect(rect);

        for (index, slide) in self.deck.slides.iter().enumerate() {
            let top = rect.top() + index as f32 * host.extent - host.offset;
            let slide_rect = egui::Rect::from_min_size(egui::pos2(rect.left(), top), rect.size());
            if !slide_rect.intersects(rect) {
                continue;
            }
            let active = host.slides.get(index).is_some_and(|s| s.active);
            let opacity = self.theme.slide_opacity(active);
            self.draw_slide(&painter, slide, slide_rect, opacity, scale);
        }
    }

    fn draw_slide(
        &self,
        painter: &egui::Painter,
        slide: &SlideText,
        rect: egui::Rect,
        opacity: f32,
        scale: f32,
    ) {
        let padding = 120.0 * scale;
        let wrap_width = (rect.width() - padding * 2.0).max(1.0);
        let heading_color = Theme::fade(self.theme.heading, opacity);
        let body_color = Theme::fade(self.theme.text, opacity);

        let heading = slide.heading.as_ref().map(|text| {
            painter.layout(
                text.clone(),
                egui::FontId::proportional(self.theme.heading_size * scale),
                heading_color,
                wrap_width,
            )
        });
        let body = (!slide.body.is_empty()).then(|| {
            painter.layout(
                slide.body.clone(),
                egui::FontId::proportional(self.theme.body_size * scale),
                body_color,
                wrap_width,
            )
        });

        let gap = 32.0 * scale;
        let heading_h = heading.as_ref().map_or(0.0, |g| g.rect.height());
        let body_h = body.as_ref().map_or(0.0, |g| g.rect.height());
        let between = if heading.is_some() && body.is_some() {
            gap
        } else {
            0.0
        };
        let mut y = rect.center().y - (heading_h + between + body_h) / 2.0;

        if let Some(galley) = heading {
            let x = rect.center().x - galley.rect.width() / 2.0;
            painter.galley(egui::pos2(x, y), galley, heading_color);
            y += heading_h + between;
        }
        if let Some(galley) = body {
            painter.galley(egui::pos2(rect.left() + padding, y), galley, body_color);
        }
    }

    fn draw_widgets(&self, ui: &egui::Ui, rect: egui::Rect) {
        let widgets: &Widgets = self.controller.widgets();
        let painter = ui.painter();
        let accent = self.theme.accent;
        let muted = self.theme.chrome;

        if let Some(progress) = &widgets.progress {
            let bar = egui::Rect::from_min_size(
                rect.left_top(),
                egui::vec2(rect.width() * progress.fill(), PROGRESS_HEIGHT),
            );
            painter.rect_filled(bar, 0.0, accent);
        }

        if let Some(dots) = &widgets.dots {
            let count = dots.dots().len();
            for (i, dot) in dots.dots().iter().enumerate() {
                let center = dot_center(i, count, rect);
                if dot.active {
                    painter.circle_filled(center, DOT_RADIUS * 1.4, accent);
                } else {
                    painter.circle_filled(center, DOT_RADIUS, muted);
                }
            }
        }

        if let Some(counter) = &widgets.counter {
            let galley = painter.layout_no_wrap(
                counter.text().to_string(),
                egui::FontId::monospace(14.0),
                muted,
            );
            let pos = egui::pos2(
                rect.right() - galley.rect.width() - CHROME_MARGIN,
                rect.bottom() - galley.rect.height() - CHROME_MARGIN,
            );
            painter.galley(pos, galley, muted);
        }

        if let Some(hint) = &widgets.keyboard_hint {
            self.draw_keyboard_hint(painter, hint.segments(), rect);
        }

        if widgets.fullscreen_button.is_some() {
            draw_fullscreen_icon(painter, fullscreen_button_rect(rect), muted);
        }

        if let Some(link) = &widgets.back_link {
            let galley = painter.layout_no_wrap(
                format!("\u{2190} {}", link.label),
                egui::FontId::proportional(14.0),
                muted,
            );
            let area = back_link_rect(rect);
            let pos = egui::pos2(area.left(), area.center().y - galley.rect.height() / 2.0);
            painter.galley(pos, galley, muted);
        }
    }

    fn draw_keyboard_hint(&self, painter: &egui::Painter, segments: &[HintSegment], rect: egui::Rect) {
        let text_color = self.theme.chrome;
        let key_bg = self.theme.key_cap;
        let font = egui::FontId::proportional(13.0);
        let mut x = rect.left() + CHROME_MARGIN;
        let baseline = rect.bottom() - CHROME_MARGIN;

        for segment in segments {
            let (text, boxed) = match segment {
                HintSegment::Key(k) => (*k, true),
                HintSegment::Text(t) => (*t, false),
            };
            let galley = painter.layout_no_wrap(text.to_string(), font.clone(), text_color);
            let size = galley.rect.size();
            let pos = egui::pos2(x, baseline - size.y);
            if boxed {
                let key_rect = egui::Rect::from_min_size(pos, size).expand(4.0);
                painter.rect_filled(key_rect, 4.0, key_bg);
            }
            painter.galley(pos, galley, text_color);
            x += size.x + 14.0;
        }
    }
}

impl eframe::App for PresentationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let events = Self::collect_events(ctx);
        self.sync_visibility(ctx);

        let bg = self.theme.background;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);

                self.sync_extent(rect, now);
                for event in events {
                    self.dispatch(ctx, rect, event, now);
                }
                self.advance_scroll(now);
                self.controller.tick(now);

                let scale = Self::compute_scale(rect);
                self.draw_slides(ui, rect, scale);
                self.draw_widgets(ui, rect);
            });

        self.schedule_repaint(ctx, now);
    }
}

/// Translate an egui key into its DOM `KeyboardEvent.key` name.
fn key_name(key: egui::Key, modifiers: &egui::Modifiers) -> Option<&'static str> {
    let name = match key {
        egui::Key::ArrowDown => "ArrowDown",
        egui::Key::ArrowRight => "ArrowRight",
        egui::Key::ArrowUp => "ArrowUp",
        egui::Key::ArrowLeft => "ArrowLeft",
        egui::Key::Space => " ",
        egui::Key::PageDown => "PageDown",
        egui::Key::PageUp => "PageUp",
        egui::Key::Home => "Home",
        egui::Key::End => "End",
        egui::Key::F if modifiers.shift => "F",
        egui::Key::F => "f",
        _ => return None,
    };
    Some(name)
}

fn map_key(key: egui::Key, modifiers: &egui::Modifiers) -> Option<Key> {
    key_name(key, modifiers).map(Key::from_name)
}

/// Backends that never report a fullscreen state cannot toggle it either.
fn fullscreen_state(reported: Option<bool>) -> Result<bool, FullscreenError> {
    reported.ok_or(FullscreenError::Unsupported)
}

fn dot_center(index: usize, count: usize, rect: egui::Rect) -> egui::Pos2 {
    let column_height = count.saturating_sub(1) as f32 * DOT_SPACING;
    let top = rect.center().y - column_height / 2.0;
    egui::pos2(
        rect.right() - CHROME_MARGIN - DOT_RADIUS,
        top + index as f32 * DOT_SPACING,
    )
}

fn fullscreen_button_rect(rect: egui::Rect) -> egui::Rect {
    egui::Rect::from_min_size(
        egui::pos2(
            rect.right() - CHROME_MARGIN - BUTTON_SIZE,
            rect.top() + CHROME_MARGIN,
        ),
        egui::vec2(BUTTON_SIZE, BUTTON_SIZE),
    )
}

fn back_link_rect(rect: egui::Rect) -> egui::Rect {
    egui::Rect::from_min_size(
        egui::pos2(rect.left() + CHROME_MARGIN, rect.top() + CHROME_MARGIN),
        egui::vec2(120.0, BUTTON_SIZE),
    )
}

/// Four corner brackets.
fn draw_fullscreen_icon(painter: &egui::Painter, rect: egui::Rect, color: egui::Color32) {
    let stroke = egui::Stroke::new(2.0, color);
    let inner = rect.shrink(8.0);
    let arm = inner.width() * 0.3;
    let corners = [
        (inner.left_top(), egui::vec2(1.0, 1.0)),
        (inner.right_top(), egui::vec2(-1.0, 1.0)),
        (inner.left_bottom(), egui::vec2(1.0, -1.0)),
        (inner.right_bottom(), egui::vec2(-1.0, -1.0)),
    ];
    for (corner, dir) in corners {
        painter.line_segment([corner, corner + egui::vec2(dir.x * arm, 0.0)], stroke);
        painter.line_segment([corner, corner + egui::vec2(0.0, dir.y * arm)], stroke);
    }
}

pub fn run(launch: Launch) -> anyhow::Result<()> {
    let deck = Deck::load(&launch.file)?;

    if deck.is_empty() {
        anyhow::bail!("No slides found in {}", launch.file.display());
    }

    let title = deck.title.clone().unwrap_or_else(|| {
        format!(
            "scrolldeck - {}",
            launch.file.file_name().unwrap_or_default().to_string_lossy()
        )
    });

    let viewport = if launch.windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    tracing::info!(slides = deck.len(), file = %launch.file.display(), "starting presentation");

    let window_title = title.clone();
    eframe::run_native(
        &window_title,
        options,
        Box::new(move |cc| {
            let app = PresentationApp::new(cc.egui_ctx.clone(), title, deck, launch);
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
