//! Single frame driver owning all per-frame work.
//!
//! Instead of self-rescheduling callbacks, every continuously running
//! subsystem exposes a per-frame hook and the director invokes them in a
//! fixed order: scroll engine, audio state, particle field, cursor,
//! timeline, count-ups. Hosts call [`Director::frame`] from their repaint
//! loop; tests call it with synthetic timestamps.

use crate::audio::{AudioAdapter, MicrophonePort};
use crate::config::AppConfig;
use crate::countup::CountUp;
use crate::cursor::CursorFollower;
use crate::gate::MotionGate;
use crate::hover;
use crate::particles::ParticleField;
use crate::render::Canvas;
use crate::scroll::{DirectScroll, ScrollEngine, ScrollState};
use crate::stage::{ElementId, ElementRole, Stage};
use crate::timeline::{
    Ease, MotionTimeline, NoopTimeline, Prop, PropSpan, TimelineEvent, TriggerKind, TriggerRegion,
    TweenSpec,
};

const ENTRANCE_DURATION: f32 = 1.2;
const ENTRANCE_STAGGER: f32 = 0.12;
const LINE_HIDDEN_Y_PERCENT: f32 = 120.0;
const SECONDARY_DURATION: f32 = 0.8;
const LEDE_DELAY: f32 = 0.6;
const LEDE_OFFSET: f32 = 20.0;
const CTA_DELAY: f32 = 0.8;
const CTA_STAGGER: f32 = 0.1;
const CTA_OFFSET: f32 = 18.0;
const REVEAL_THRESHOLD: f32 = 0.8;
const CARD_DURATION: f32 = 0.8;
const CARD_STAGGER: f32 = 0.08;
const CARD_HIDDEN_OFFSET: f32 = 24.0;
const COUNT_DURATION: f32 = 1.2;
/// Layer number, y-percent drift, rotation.
const PARALLAX: [(u8, f32, f32); 3] = [(1, 10.0, 0.0), (2, -12.0, 0.0), (3, 18.0, 8.0)];

const AUDIO_LABEL_OFF: &str = "Audio";
const AUDIO_LABEL_ON: &str = "Audio: On";

/// Viewport geometry the host resolves at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub content_height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, content_height: f32) -> Self {
        Self {
            width,
            height,
            content_height,
        }
    }
}

/// Optional external engines resolved once at startup. Anything left unset
/// falls back to a no-op implementation and the dependent effects are
/// skipped, never failed.
#[derive(Default)]
pub struct HostBindings {
    pub canvas: Option<Box<dyn Canvas>>,
    pub timeline: Option<Box<dyn MotionTimeline>>,
    pub scroll: Option<Box<dyn ScrollEngine>>,
}

/// The frame driver.
pub struct Director {
    gate: MotionGate,
    stage: Stage,
    canvas: Option<Box<dyn Canvas>>,
    timeline: Box<dyn MotionTimeline>,
    scroll_engine: Box<dyn ScrollEngine>,
    scroll: ScrollState,
    audio: AudioAdapter,
    field: Option<ParticleField>,
    cursor: Option<CursorFollower>,
    cursor_dot: Option<ElementId>,
    countups: Vec<CountUp>,
}

impl Director {
    pub fn new(
        config: AppConfig,
        mut stage: Stage,
        gate: MotionGate,
        viewport: Viewport,
        bindings: HostBindings,
    ) -> Self {
        if let Some(year) = config.page.year {
            stage.set_year(year);
        }

        let mut timeline = bindings
            .timeline
            .unwrap_or_else(|| Box::new(NoopTimeline::default()));

        // Reduced motion skips smooth scrolling entirely; the page scrolls
        // natively no matter what the host injected.
        let mut scroll_engine: Box<dyn ScrollEngine> = if gate.is_reduced() {
            Box::new(DirectScroll::default())
        } else {
            bindings
                .scroll
                .unwrap_or_else(|| Box::new(DirectScroll::default()))
        };
        scroll_engine.configure(config.scroll);

        let mut canvas = bindings.canvas;
        let field = match (&mut canvas, gate.is_reduced()) {
            (Some(canvas), false) => {
                canvas.resize(viewport.width as u32, viewport.height as u32);
                Some(ParticleField::new(
                    config.particles.clone(),
                    viewport.width,
                    viewport.height,
                ))
            }
            _ => None,
        };

        let cursor_dot = stage.cursor_dot();
        let cursor = if CursorFollower::should_enable(
            cursor_dot.is_some(),
            &gate,
            viewport.width,
            &config.cursor,
        ) {
            Some(CursorFollower::new(&config.cursor))
        } else {
            // Hidden outright rather than left inert.
            if let Some(id) = cursor_dot {
                if let Some(props) = stage.props_mut(id) {
                    props.visible = false;
                }
            }
            None
        };

        declare_rules(timeline.as_mut(), &mut stage, viewport.height);

        if gate.is_reduced() {
            timeline.disable_triggers();
            timeline.pause();
            for event in timeline.settle(&mut stage) {
                let TimelineEvent::CountUpStarted { element, target, .. } = event;
                if let Some(props) = stage.props_mut(element) {
                    props.text = target.to_string();
                }
            }
            tracing::info!("reduced motion requested, continuous animation disabled");
        }

        let audio = AudioAdapter::new(&config.audio);
        let scroll = ScrollState::new(viewport.height, viewport.content_height);

        Self {
            gate,
            stage,
            canvas,
            timeline,
            scroll_engine,
            scroll,
            audio,
            field,
            cursor,
            cursor_dot,
            countups: Vec::new(),
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn audio(&self) -> &AudioAdapter {
        &self.audio
    }

    pub fn gate(&self) -> MotionGate {
        self.gate
    }

    /// Whether the particle loop is running at all.
    pub fn particles_active(&self) -> bool {
        self.field.is_some()
    }

    pub fn cursor_active(&self) -> bool {
        self.cursor.is_some()
    }

    /// Raw pointer input; stored as the cursor target, last write wins.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        if let Some(cursor) = self.cursor.as_mut() {
            cursor.pointer_moved(x, y);
        }
    }

    /// New viewport dimensions. The drawing surface resizes immediately;
    /// particle regeneration waits out the debounce window inside the
    /// field.
    pub fn window_resized(&mut self, width: f32, height: f32, now: f64) {
        self.scroll.viewport_height = height;
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.resize(width as u32, height as u32);
        }
        if let Some(field) = self.field.as_mut() {
            field.resize(width, height, now);
        }
    }

    /// Host scroll intent (wheel, touch, anchor). The smooth-scroll engine
    /// owns how the offset gets there.
    pub fn scrolled(&mut self, target: f32) {
        let target = target.clamp(0.0, self.scroll.max_offset());
        self.scroll_engine.set_target(target);
    }

    /// User pressed the audio opt-in control.
    pub fn toggle_audio(&mut self, port: &mut dyn MicrophonePort) {
        self.audio.toggle(port);
        self.sync_audio_toggle();
        // A port may resolve synchronously; reflect a denial right away.
        self.poll_audio();
    }

    /// Pointer moving inside a step tile, normalized to its rect.
    pub fn step_hover(&mut self, element: ElementId, u: f32, v: f32) {
        if self.role_of(element) != Some(ElementRole::StepTile) {
            return;
        }
        let (tilt_x, tilt_y) = hover::tilt(u, v);
        if let Some(props) = self.stage.props_mut(element) {
            props.tilt_x = tilt_x;
            props.tilt_y = tilt_y;
        }
    }

    pub fn step_leave(&mut self, element: ElementId) {
        if let Some(props) = self.stage.props_mut(element) {
            props.tilt_x = 0.0;
            props.tilt_y = 0.0;
        }
    }

    pub fn button_hover(&mut self, element: ElementId, hovered: bool) {
        if self.role_of(element) != Some(ElementRole::CtaButton) {
            return;
        }
        if let Some(props) = self.stage.props_mut(element) {
            props.scale = if hovered {
                hover::BUTTON_HOVER_SCALE
            } else {
                1.0
            };
        }
    }

    /// Advances one frame. `now` is wall-clock seconds, `dt` the elapsed
    /// time since the previous frame.
    pub fn frame(&mut self, now: f64, dt: f32) {
        self.scroll.offset = self.scroll_engine.raf(now);

        self.poll_audio();

        if let (Some(field), Some(canvas)) = (self.field.as_mut(), self.canvas.as_mut()) {
            let amplitude = field.amplitude(self.audio.sample());
            field.tick(now, amplitude, canvas.as_mut());
        }

        if let Some(cursor) = self.cursor.as_mut() {
            let (x, y) = cursor.tick();
            if let Some(id) = self.cursor_dot {
                if let Some(props) = self.stage.props_mut(id) {
                    props.translate_x = x;
                    props.translate_y = y;
                }
            }
        }

        for event in self.timeline.step(dt, &self.scroll, &mut self.stage) {
            let TimelineEvent::CountUpStarted {
                element,
                target,
                duration,
            } = event;
            self.countups
                .push(CountUp::start(element, target, duration, now));
        }

        let stage = &mut self.stage;
        self.countups.retain(|count| count.tick(now, stage));
    }

    fn role_of(&self, element: ElementId) -> Option<ElementRole> {
        self.stage.get(element).map(|e| e.role)
    }

    fn sync_audio_toggle(&mut self) {
        let on = self.audio.is_on();
        if let Some(id) = self.stage.audio_toggle() {
            if let Some(props) = self.stage.props_mut(id) {
                props.checked = on;
                props.text = if on { AUDIO_LABEL_ON } else { AUDIO_LABEL_OFF }.to_string();
            }
        }
    }

    /// Applies the UI transition for a resolved permission denial exactly
    /// once: toggle reverted, visible error marker, one warning logged.
    fn poll_audio(&mut self) {
        if let Some(reason) = self.audio.take_denial() {
            tracing::warn!(%reason, "microphone access denied or failed");
            self.sync_audio_toggle();
            if let Some(id) = self.stage.audio_toggle() {
                if let Some(props) = self.stage.props_mut(id) {
                    props.error = true;
                }
            }
        }
    }
}

impl std::fmt::Debug for Director {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Director")
            .field("reduced", &self.gate.is_reduced())
            .field("particles", &self.particles_active())
            .field("cursor", &self.cursor_active())
            .field("audio", &self.audio.state())
            .field("countups", &self.countups.len())
            .finish()
    }
}

/// Declares every animation rule once at startup. Rules are immutable
/// afterwards; reduced motion only ever disables them globally.
fn declare_rules(timeline: &mut dyn MotionTimeline, stage: &mut Stage, viewport_height: f32) {
    // Kinetic headline: lines start below their box and fully transparent,
    // then rise in with a per-line stagger.
    for (index, id) in stage.kinetic_lines().into_iter().enumerate() {
        timeline.set(
            id,
            &[
                (Prop::YPercent, LINE_HIDDEN_Y_PERCENT),
                (Prop::Opacity, 0.0),
            ],
            stage,
        );
        timeline.add_tween(
            TweenSpec {
                element: id,
                spans: vec![
                    PropSpan::from_to(Prop::YPercent, LINE_HIDDEN_Y_PERCENT, 0.0),
                    PropSpan::from_to(Prop::Opacity, 0.0, 1.0),
                ],
                duration: ENTRANCE_DURATION,
                delay: index as f32 * ENTRANCE_STAGGER,
                ease: Ease::PowerOut(3),
            },
            true,
        );
    }

    if let Some(id) = stage.lede() {
        timeline.set(
            id,
            &[(Prop::Opacity, 0.0), (Prop::TranslateY, LEDE_OFFSET)],
            stage,
        );
        timeline.add_tween(
            TweenSpec {
                element: id,
                spans: vec![
                    PropSpan::from_to(Prop::Opacity, 0.0, 1.0),
                    PropSpan::from_to(Prop::TranslateY, LEDE_OFFSET, 0.0),
                ],
                duration: SECONDARY_DURATION,
                delay: LEDE_DELAY,
                ease: Ease::PowerOut(2),
            },
            true,
        );
    }

    for (index, id) in stage.cta_buttons().into_iter().enumerate() {
        timeline.set(
            id,
            &[(Prop::Opacity, 0.0), (Prop::TranslateY, CTA_OFFSET)],
            stage,
        );
        timeline.add_tween(
            TweenSpec {
                element: id,
                spans: vec![
                    PropSpan::from_to(Prop::Opacity, 0.0, 1.0),
                    PropSpan::from_to(Prop::TranslateY, CTA_OFFSET, 0.0),
                ],
                duration: SECONDARY_DURATION,
                delay: CTA_DELAY + index as f32 * CTA_STAGGER,
                ease: Ease::PowerOut(2),
            },
            true,
        );
    }

    // Parallax layers scrub across the hero: one viewport of scroll.
    let hero = TriggerRegion {
        start: 0.0,
        end: viewport_height.max(1.0),
    };
    for (layer, y_percent, rotation) in PARALLAX {
        let Some(id) = stage.parallax_layer(layer) else {
            continue;
        };
        let mut spans = vec![PropSpan::from_to(Prop::YPercent, 0.0, y_percent)];
        if rotation != 0.0 {
            spans.push(PropSpan::from_to(Prop::Rotation, 0.0, rotation));
        }
        let tween = timeline.add_tween(
            TweenSpec {
                element: id,
                spans,
                duration: 1.0,
                delay: 0.0,
                ease: Ease::Linear,
            },
            false,
        );
        timeline.add_trigger(TriggerKind::Scrub {
            region: hero,
            tween,
        });
    }

    // Work cards reveal at the 80% line, replaying on every re-entry.
    for (index, id) in stage.cards().into_iter().enumerate() {
        timeline.set(
            id,
            &[(Prop::Opacity, 0.0), (Prop::TranslateY, CARD_HIDDEN_OFFSET)],
            stage,
        );
        let tween = timeline.add_tween(
            TweenSpec {
                element: id,
                spans: vec![
                    PropSpan::from_to(Prop::Opacity, 0.0, 1.0),
                    PropSpan::from_to(Prop::TranslateY, CARD_HIDDEN_OFFSET, 0.0),
                ],
                duration: CARD_DURATION,
                delay: index as f32 * CARD_STAGGER,
                ease: Ease::PowerOut(3),
            },
            false,
        );
        timeline.add_trigger(TriggerKind::Toggle {
            element: id,
            threshold: REVEAL_THRESHOLD,
            tween,
        });
    }

    // Stat counters fire their count-up at most once.
    for (id, target) in stage.stat_numbers() {
        timeline.add_trigger(TriggerKind::Once {
            element: id,
            threshold: REVEAL_THRESHOLD,
            event: TimelineEvent::CountUpStarted {
                element: id,
                target,
                duration: COUNT_DURATION,
            },
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioState, PermissionOutcome, PermissionResponder, SampleSink};
    use crate::render::PixelCanvas;
    use crate::stage::StageDescriptor;
    use crate::timeline::Timeline;

    const DT: f32 = 1.0 / 60.0;

    struct ScriptedPort {
        grant: bool,
    }

    impl MicrophonePort for ScriptedPort {
        fn request(&mut self, _sink: SampleSink, responder: PermissionResponder) {
            if self.grant {
                responder.resolve(PermissionOutcome::Granted);
            } else {
                responder.resolve(PermissionOutcome::Denied("no device".into()));
            }
        }
    }

    fn full_bindings() -> HostBindings {
        HostBindings {
            canvas: Some(Box::new(PixelCanvas::new(1, 1))),
            timeline: Some(Box::new(Timeline::new())),
            scroll: None,
        }
    }

    fn director(gate: MotionGate) -> Director {
        Director::new(
            AppConfig::live_defaults(),
            Stage::new(&StageDescriptor::portfolio_demo()),
            gate,
            Viewport::new(1280.0, 800.0, 3400.0),
            full_bindings(),
        )
    }

    fn run(director: &mut Director, from_frame: usize, frames: usize) -> usize {
        for frame in from_frame..from_frame + frames {
            director.frame(frame as f64 * DT as f64, DT);
        }
        from_frame + frames
    }

    #[test]
    fn entrance_settles_lines_to_neutral() {
        let mut director = director(MotionGate::new(false));
        let lines = director.stage().kinetic_lines();
        assert_eq!(director.stage().props(lines[0]).unwrap().opacity, 0.0);

        run(&mut director, 0, 200);
        for id in lines {
            let props = director.stage().props(id).unwrap();
            assert_eq!(props.opacity, 1.0);
            assert_eq!(props.y_percent, 0.0);
        }
        let lede = director.stage().lede().unwrap();
        assert_eq!(director.stage().props(lede).unwrap().opacity, 1.0);
    }

    #[test]
    fn cards_reveal_and_re_hide_with_scroll() {
        let mut director = director(MotionGate::new(false));
        let card = director.stage().cards()[0];

        let mut frame = run(&mut director, 0, 5);
        assert_eq!(director.stage().props(card).unwrap().opacity, 0.0);

        director.scrolled(1000.0);
        frame = run(&mut director, frame, 120);
        assert_eq!(director.stage().props(card).unwrap().opacity, 1.0);

        director.scrolled(0.0);
        frame = run(&mut director, frame, 120);
        assert_eq!(director.stage().props(card).unwrap().opacity, 0.0);

        director.scrolled(1000.0);
        run(&mut director, frame, 120);
        assert_eq!(director.stage().props(card).unwrap().opacity, 1.0);
    }

    #[test]
    fn counters_count_up_exactly_once() {
        let mut director = director(MotionGate::new(false));
        let (counter, target) = director.stage().stat_numbers()[0];

        director.scrolled(2200.0);
        let frame = run(&mut director, 0, 200);
        assert_eq!(
            director.stage().props(counter).unwrap().text,
            target.to_string()
        );

        // Leaving and re-entering must not restart the counter.
        director.scrolled(0.0);
        let frame = run(&mut director, frame, 30);
        director.scrolled(2200.0);
        run(&mut director, frame, 30);
        assert_eq!(
            director.stage().props(counter).unwrap().text,
            target.to_string()
        );
    }

    #[test]
    fn parallax_layers_track_scroll_progress() {
        let mut director = director(MotionGate::new(false));
        let layer3 = director.stage().parallax_layer(3).unwrap();

        director.scrolled(400.0);
        run(&mut director, 0, 3);
        let props = director.stage().props(layer3).unwrap();
        assert_eq!(props.y_percent, 9.0);
        assert_eq!(props.rotation, 4.0);
    }

    #[test]
    fn reduced_motion_is_static_but_settled() {
        let mut director = director(MotionGate::new(true));

        assert!(!director.particles_active());
        assert!(!director.cursor_active());
        let dot = director.stage().cursor_dot().unwrap();
        assert!(!director.stage().props(dot).unwrap().visible);

        for id in director.stage().kinetic_lines() {
            let props = director.stage().props(id).unwrap();
            assert_eq!(props.opacity, 1.0);
            assert_eq!(props.y_percent, 0.0);
        }
        for id in director.stage().cards() {
            assert_eq!(director.stage().props(id).unwrap().opacity, 1.0);
        }
        for (id, target) in director.stage().stat_numbers() {
            assert_eq!(
                director.stage().props(id).unwrap().text,
                target.to_string()
            );
        }

        // Parallax layers settle where the static page leaves them.
        for layer in 1..=3 {
            let id = director.stage().parallax_layer(layer).unwrap();
            assert_eq!(director.stage().props(id).unwrap().y_percent, 0.0);
            assert_eq!(director.stage().props(id).unwrap().rotation, 0.0);
        }

        // Scrolling afterwards changes nothing.
        director.scrolled(1000.0);
        run(&mut director, 0, 10);
        for id in director.stage().cards() {
            assert_eq!(director.stage().props(id).unwrap().opacity, 1.0);
        }
    }

    #[test]
    fn absent_animation_engine_leaves_the_page_visible() {
        let mut director = Director::new(
            AppConfig::live_defaults(),
            Stage::new(&StageDescriptor::portfolio_demo()),
            MotionGate::new(false),
            Viewport::new(1280.0, 800.0, 3400.0),
            HostBindings {
                canvas: Some(Box::new(PixelCanvas::new(1, 1))),
                timeline: None,
                scroll: None,
            },
        );

        // No engine means no hiding and no animation: content is static
        // but fully readable.
        run(&mut director, 0, 30);
        for id in director.stage().kinetic_lines() {
            assert_eq!(director.stage().props(id).unwrap().opacity, 1.0);
        }
        for id in director.stage().cards() {
            assert_eq!(director.stage().props(id).unwrap().opacity, 1.0);
        }
    }

    #[test]
    fn cursor_follows_pointer_when_active() {
        let mut director = director(MotionGate::new(false));
        assert!(director.cursor_active());
        let dot = director.stage().cursor_dot().unwrap();

        director.pointer_moved(200.0, 120.0);
        run(&mut director, 0, 2);
        let first = director.stage().props(dot).unwrap().translate_x;
        assert!(first > -12.0);

        run(&mut director, 2, 60);
        let settled = director.stage().props(dot).unwrap();
        assert!((settled.translate_x - 188.0).abs() < 0.5);
        assert!((settled.translate_y - 108.0).abs() < 0.5);
    }

    #[test]
    fn narrow_viewport_hides_the_cursor() {
        let director = Director::new(
            AppConfig::live_defaults(),
            Stage::new(&StageDescriptor::portfolio_demo()),
            MotionGate::new(false),
            Viewport::new(600.0, 800.0, 3400.0),
            full_bindings(),
        );
        assert!(!director.cursor_active());
        let dot = director.stage().cursor_dot().unwrap();
        assert!(!director.stage().props(dot).unwrap().visible);
    }

    #[test]
    fn denied_microphone_reverts_the_toggle() {
        let mut director = director(MotionGate::new(false));
        let toggle = director.stage().audio_toggle().unwrap();
        let mut port = ScriptedPort { grant: false };

        director.toggle_audio(&mut port);
        assert_eq!(director.audio().state(), AudioState::Denied);
        assert!(!director.audio().is_on());
        let props = director.stage().props(toggle).unwrap();
        assert!(props.error);
        assert!(!props.checked);
        assert_eq!(props.text, AUDIO_LABEL_OFF);

        // Every later frame renders unmodulated.
        run(&mut director, 0, 5);
        assert!(director.audio().sample().is_none());
    }

    #[test]
    fn granted_microphone_marks_the_toggle_on() {
        let mut director = director(MotionGate::new(false));
        let toggle = director.stage().audio_toggle().unwrap();
        let mut port = ScriptedPort { grant: true };

        director.toggle_audio(&mut port);
        let props = director.stage().props(toggle).unwrap();
        assert!(props.checked);
        assert!(!props.error);
        assert_eq!(props.text, AUDIO_LABEL_ON);
        run(&mut director, 0, 5);
    }

    #[test]
    fn hover_effects_write_and_reset() {
        let mut director = director(MotionGate::new(false));
        let tile = director.stage().step_tiles()[0];
        let button = director.stage().cta_buttons()[0];

        director.step_hover(tile, 1.0, 0.0);
        let props = director.stage().props(tile).unwrap();
        assert_eq!(props.tilt_x, hover::TILT_DEG);
        assert_eq!(props.tilt_y, hover::TILT_DEG);
        director.step_leave(tile);
        assert_eq!(director.stage().props(tile).unwrap().tilt_x, 0.0);

        director.button_hover(button, true);
        assert_eq!(
            director.stage().props(button).unwrap().scale,
            hover::BUTTON_HOVER_SCALE
        );
        director.button_hover(button, false);
        assert_eq!(director.stage().props(button).unwrap().scale, 1.0);

        // Roles are checked; a tile is not a button.
        director.button_hover(tile, true);
        assert_eq!(director.stage().props(tile).unwrap().scale, 1.0);
    }

    #[test]
    fn year_is_written_when_configured() {
        let mut config = AppConfig::live_defaults();
        config.page.year = Some(2026);
        let director = Director::new(
            config,
            Stage::new(&StageDescriptor::portfolio_demo()),
            MotionGate::new(false),
            Viewport::new(1280.0, 800.0, 3400.0),
            full_bindings(),
        );
        let year = director.stage().year_display().unwrap();
        assert_eq!(director.stage().props(year).unwrap().text, "2026");
    }

    #[test]
    fn bare_host_runs_without_any_engines_or_elements() {
        let mut director = Director::new(
            AppConfig::live_defaults(),
            Stage::new(&StageDescriptor::default()),
            MotionGate::new(false),
            Viewport::new(1280.0, 800.0, 800.0),
            HostBindings::default(),
        );
        assert!(!director.particles_active());
        assert!(!director.cursor_active());
        director.pointer_moved(10.0, 10.0);
        director.scrolled(100.0);
        director.window_resized(640.0, 480.0, 0.0);
        run(&mut director, 0, 10);
    }

    #[test]
    fn resize_regenerates_particles_after_the_debounce() {
        let mut director = director(MotionGate::new(false));
        assert!(director.particles_active());

        director.window_resized(2000.0, 1000.0, 1.0);
        director.frame(1.05, DT);
        let field = director.field.as_ref().unwrap();
        assert!(field.regen_pending());

        director.frame(1.25, DT);
        let field = director.field.as_ref().unwrap();
        assert!(!field.regen_pending());
        assert_eq!(field.particles().len(), 100);
    }
}
