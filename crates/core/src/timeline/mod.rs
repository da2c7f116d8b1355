//! Tween and scroll-trigger engine.
//!
//! The orchestrator declares animation rules once at startup against the
//! [`MotionTimeline`] boundary; rules are immutable afterwards except for
//! the global disable/pause issued under reduced motion. [`Timeline`] is
//! the engine shipped with the crate; hosts integrating a third-party
//! engine implement the trait themselves, and [`NoopTimeline`] keeps a
//! page without any engine working with all effects skipped.

use crate::scroll::ScrollState;
use crate::stage::{ElementId, Stage};

/// Easing curves used by the declared rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ease {
    /// No shaping; also used for scrubbed tweens.
    Linear,
    /// Decelerating ease-out, `1 - (1 - p)^n`.
    PowerOut(i32),
}

impl Ease {
    pub fn apply(self, p: f32) -> f32 {
        let p = p.clamp(0.0, 1.0);
        match self {
            Ease::Linear => p,
            Ease::PowerOut(n) => 1.0 - (1.0 - p).powi(n),
        }
    }
}

/// Animatable element property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prop {
    Opacity,
    YPercent,
    TranslateX,
    TranslateY,
    Rotation,
    Scale,
}

fn read_prop(stage: &Stage, element: ElementId, prop: Prop) -> f32 {
    let Some(props) = stage.props(element) else {
        return 0.0;
    };
    match prop {
        Prop::Opacity => props.opacity,
        Prop::YPercent => props.y_percent,
        Prop::TranslateX => props.translate_x,
        Prop::TranslateY => props.translate_y,
        Prop::Rotation => props.rotation,
        Prop::Scale => props.scale,
    }
}

fn write_prop(stage: &mut Stage, element: ElementId, prop: Prop, value: f32) {
    let Some(props) = stage.props_mut(element) else {
        return;
    };
    match prop {
        Prop::Opacity => props.opacity = value,
        Prop::YPercent => props.y_percent = value,
        Prop::TranslateX => props.translate_x = value,
        Prop::TranslateY => props.translate_y = value,
        Prop::Rotation => props.rotation = value,
        Prop::Scale => props.scale = value,
    }
}

/// One animated property range. `from: None` captures the element's current
/// value the first time the tween runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropSpan {
    pub prop: Prop,
    pub from: Option<f32>,
    pub to: f32,
}

impl PropSpan {
    pub fn to(prop: Prop, to: f32) -> Self {
        Self { prop, from: None, to }
    }

    pub fn from_to(prop: Prop, from: f32, to: f32) -> Self {
        Self { prop, from: Some(from), to }
    }
}

/// Declarative tween over one element.
#[derive(Debug, Clone, PartialEq)]
pub struct TweenSpec {
    pub element: ElementId,
    pub spans: Vec<PropSpan>,
    pub duration: f32,
    pub delay: f32,
    pub ease: Ease,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenId(usize);

impl TweenId {
    /// Engines hand out their own ids; the crate's engine uses the
    /// registration index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

/// Document region a scrubbed tween maps onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerRegion {
    pub start: f32,
    pub end: f32,
}

impl TriggerRegion {
    pub fn progress(&self, offset: f32) -> f32 {
        let span = self.end - self.start;
        if span <= f32::EPSILON {
            return if offset >= self.end { 1.0 } else { 0.0 };
        }
        ((offset - self.start) / span).clamp(0.0, 1.0)
    }
}

/// Scroll-bound rule kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerKind {
    /// Tween progress follows scroll progress through a region.
    Scrub { region: TriggerRegion, tween: TweenId },
    /// Play when the element crosses the viewport threshold scrolling down,
    /// reverse when it leaves again. Replayable by design.
    Toggle {
        element: ElementId,
        /// Fraction of viewport height forming the reveal line.
        threshold: f32,
        tween: TweenId,
    },
    /// Emit an event on first entry, then never again.
    Once {
        element: ElementId,
        threshold: f32,
        event: TimelineEvent,
    },
}

/// Events surfaced from trigger evaluation, consumed by the frame driver.
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineEvent {
    CountUpStarted {
        element: ElementId,
        target: u64,
        duration: f32,
    },
}

/// External animation/timeline engine boundary.
pub trait MotionTimeline {
    /// Immediately writes starting values, the "set hidden, then animate
    /// in" idiom. A host without an engine skips the hiding too, so the
    /// page stays fully visible when no animation will ever run.
    fn set(&mut self, element: ElementId, values: &[(Prop, f32)], stage: &mut Stage);
    fn add_tween(&mut self, spec: TweenSpec, autoplay: bool) -> TweenId;
    fn add_trigger(&mut self, kind: TriggerKind);
    /// Permanently deactivates every registered scroll trigger.
    fn disable_triggers(&mut self);
    /// Pauses the global timeline; `step` becomes a no-op.
    fn pause(&mut self);
    /// Jumps every tween to its end state and resolves once-triggers,
    /// returning their events so the caller can apply final values.
    fn settle(&mut self, stage: &mut Stage) -> Vec<TimelineEvent>;
    /// Advances time-based tweens by `dt`, evaluates triggers against the
    /// scroll state, applies property values, and reports fired events.
    fn step(&mut self, dt: f32, scroll: &ScrollState, stage: &mut Stage) -> Vec<TimelineEvent>;
}

/// Engine used when no animation engine is available: registration is
/// accepted and dropped, stepping does nothing, nothing ever fails.
#[derive(Debug, Default)]
pub struct NoopTimeline {
    tweens: usize,
}

impl MotionTimeline for NoopTimeline {
    fn set(&mut self, _element: ElementId, _values: &[(Prop, f32)], _stage: &mut Stage) {}

    fn add_tween(&mut self, _spec: TweenSpec, _autoplay: bool) -> TweenId {
        self.tweens += 1;
        TweenId(self.tweens - 1)
    }

    fn add_trigger(&mut self, _kind: TriggerKind) {}

    fn disable_triggers(&mut self) {}

    fn pause(&mut self) {}

    fn settle(&mut self, _stage: &mut Stage) -> Vec<TimelineEvent> {
        Vec::new()
    }

    fn step(&mut self, _dt: f32, _scroll: &ScrollState, _stage: &mut Stage) -> Vec<TimelineEvent> {
        Vec::new()
    }
}

struct Tween {
    spec: TweenSpec,
    resolved: Option<Vec<(Prop, f32, f32)>>,
    progress: f32,
    direction: f32,
    pending_delay: f32,
    started: bool,
}

impl Tween {
    fn new(spec: TweenSpec, autoplay: bool) -> Self {
        let pending_delay = spec.delay;
        Self {
            spec,
            resolved: None,
            progress: 0.0,
            direction: if autoplay { 1.0 } else { 0.0 },
            pending_delay,
            started: autoplay,
        }
    }

    fn play(&mut self) {
        if !self.started || self.progress <= 0.0 {
            self.pending_delay = self.spec.delay;
        }
        self.started = true;
        self.direction = 1.0;
    }

    fn reverse(&mut self) {
        if self.started {
            self.direction = -1.0;
            self.pending_delay = 0.0;
        }
    }

    fn scrub_to(&mut self, progress: f32) {
        self.started = true;
        self.direction = 0.0;
        self.progress = progress.clamp(0.0, 1.0);
    }

    fn advance(&mut self, dt: f32) {
        if self.direction == 0.0 || !self.started {
            return;
        }
        let mut dt = dt;
        if self.direction > 0.0 && self.pending_delay > 0.0 {
            let consumed = self.pending_delay.min(dt);
            self.pending_delay -= consumed;
            dt -= consumed;
            if dt <= 0.0 {
                return;
            }
        }
        let duration = self.spec.duration.max(1e-6);
        self.progress = (self.progress + self.direction * dt / duration).clamp(0.0, 1.0);
        if self.progress <= 0.0 || self.progress >= 1.0 {
            self.direction = 0.0;
        }
    }

    fn force_end(&mut self) {
        self.started = true;
        self.direction = 0.0;
        self.pending_delay = 0.0;
        self.progress = 1.0;
    }

    fn apply(&mut self, stage: &mut Stage) {
        if !self.started {
            return;
        }
        let element = self.spec.element;
        let resolved = self.resolved.get_or_insert_with(|| {
            self.spec
                .spans
                .iter()
                .map(|span| {
                    let from = span
                        .from
                        .unwrap_or_else(|| read_prop(stage, element, span.prop));
                    (span.prop, from, span.to)
                })
                .collect()
        });
        let eased = self.spec.ease.apply(self.progress);
        for (prop, from, to) in resolved.iter() {
            write_prop(stage, element, *prop, from + (to - from) * eased);
        }
    }
}

struct Trigger {
    kind: TriggerKind,
    active: bool,
    fired: bool,
}

/// The tween and scroll-trigger engine shipped with the crate.
pub struct Timeline {
    tweens: Vec<Tween>,
    triggers: Vec<Trigger>,
    triggers_enabled: bool,
    paused: bool,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            tweens: Vec::new(),
            triggers: Vec::new(),
            triggers_enabled: true,
            paused: false,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn triggers_enabled(&self) -> bool {
        self.triggers_enabled
    }

    pub fn tween_progress(&self, id: TweenId) -> Option<f32> {
        self.tweens.get(id.0).map(|tween| tween.progress)
    }

    fn crossed(stage: &Stage, scroll: &ScrollState, element: ElementId, threshold: f32) -> bool {
        let Some(top) = stage.top(element) else {
            return false;
        };
        top <= scroll.offset + threshold * scroll.viewport_height
    }

    fn evaluate_triggers(
        &mut self,
        scroll: &ScrollState,
        stage: &mut Stage,
        events: &mut Vec<TimelineEvent>,
    ) {
        for trigger in &mut self.triggers {
            match &trigger.kind {
                TriggerKind::Scrub { region, tween } => {
                    let progress = region.progress(scroll.offset);
                    if let Some(tween) = self.tweens.get_mut(tween.0) {
                        tween.scrub_to(progress);
                    }
                }
                TriggerKind::Toggle {
                    element,
                    threshold,
                    tween,
                } => {
                    let now_active = Self::crossed(stage, scroll, *element, *threshold);
                    if now_active != trigger.active {
                        if let Some(tween) = self.tweens.get_mut(tween.0) {
                            if now_active {
                                tween.play();
                            } else {
                                tween.reverse();
                            }
                        }
                        trigger.active = now_active;
                    }
                }
                TriggerKind::Once {
                    element,
                    threshold,
                    event,
                } => {
                    if !trigger.fired && Self::crossed(stage, scroll, *element, *threshold) {
                        trigger.fired = true;
                        events.push(event.clone());
                    }
                }
            }
        }
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionTimeline for Timeline {
    fn set(&mut self, element: ElementId, values: &[(Prop, f32)], stage: &mut Stage) {
        for (prop, value) in values {
            write_prop(stage, element, *prop, *value);
        }
    }

    fn add_tween(&mut self, spec: TweenSpec, autoplay: bool) -> TweenId {
        self.tweens.push(Tween::new(spec, autoplay));
        TweenId(self.tweens.len() - 1)
    }

    fn add_trigger(&mut self, kind: TriggerKind) {
        self.triggers.push(Trigger {
            kind,
            active: false,
            fired: false,
        });
    }

    fn disable_triggers(&mut self) {
        self.triggers_enabled = false;
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn settle(&mut self, stage: &mut Stage) -> Vec<TimelineEvent> {
        let mut events = Vec::new();
        // Scrubbed tweens have no "end" of their own; their settled state is
        // wherever the (now static) scroll position leaves them.
        let scrubbed: Vec<usize> = self
            .triggers
            .iter()
            .filter_map(|trigger| match &trigger.kind {
                TriggerKind::Scrub { tween, .. } => Some(tween.0),
                _ => None,
            })
            .collect();
        for (index, tween) in self.tweens.iter_mut().enumerate() {
            if scrubbed.contains(&index) {
                continue;
            }
            tween.force_end();
            tween.apply(stage);
        }
        for trigger in &mut self.triggers {
            if let TriggerKind::Once { event, .. } = &trigger.kind {
                if !trigger.fired {
                    trigger.fired = true;
                    events.push(event.clone());
                }
            }
        }
        events
    }

    fn step(&mut self, dt: f32, scroll: &ScrollState, stage: &mut Stage) -> Vec<TimelineEvent> {
        let mut events = Vec::new();
        if self.paused {
            return events;
        }
        if self.triggers_enabled {
            self.evaluate_triggers(scroll, stage, &mut events);
        }
        for tween in &mut self.tweens {
            tween.advance(dt);
            tween.apply(stage);
        }
        events
    }
}

impl std::fmt::Debug for Timeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timeline")
            .field("tweens", &self.tweens.len())
            .field("triggers", &self.triggers.len())
            .field("triggers_enabled", &self.triggers_enabled)
            .field("paused", &self.paused)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::{ElementRole, ElementSpec, StageDescriptor};

    const DT: f32 = 1.0 / 60.0;

    fn stage_with(specs: Vec<ElementSpec>) -> Stage {
        Stage::new(&StageDescriptor { elements: specs })
    }

    fn card_stage() -> Stage {
        stage_with(vec![ElementSpec::new(ElementRole::Card, 1000.0)])
    }

    fn scroll(offset: f32) -> ScrollState {
        let mut state = ScrollState::new(800.0, 4000.0);
        state.offset = offset;
        state
    }

    fn fade_in(element: ElementId) -> TweenSpec {
        TweenSpec {
            element,
            spans: vec![
                PropSpan::from_to(Prop::Opacity, 0.0, 1.0),
                PropSpan::from_to(Prop::TranslateY, 24.0, 0.0),
            ],
            duration: 0.8,
            delay: 0.0,
            ease: Ease::PowerOut(3),
        }
    }

    fn run(timeline: &mut Timeline, stage: &mut Stage, offset: f32, frames: usize) {
        let state = scroll(offset);
        for _ in 0..frames {
            timeline.step(DT, &state, stage);
        }
    }

    #[test]
    fn power_out_decelerates_to_one() {
        let ease = Ease::PowerOut(3);
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
        assert!(ease.apply(0.5) > 0.5, "ease-out front-loads movement");
    }

    #[test]
    fn autoplay_tween_runs_after_its_delay() {
        let mut stage = card_stage();
        let element = stage.cards()[0];
        let mut timeline = Timeline::new();
        let spec = TweenSpec {
            delay: 0.5,
            ..fade_in(element)
        };
        let id = timeline.add_tween(spec, true);

        run(&mut timeline, &mut stage, 0.0, 15);
        assert_eq!(timeline.tween_progress(id), Some(0.0), "still in delay");

        run(&mut timeline, &mut stage, 0.0, 120);
        assert_eq!(timeline.tween_progress(id), Some(1.0));
        assert_eq!(stage.props(element).unwrap().opacity, 1.0);
        assert_eq!(stage.props(element).unwrap().translate_y, 0.0);
    }

    #[test]
    fn toggle_trigger_reveals_and_re_hides() {
        let mut stage = card_stage();
        let element = stage.cards()[0];
        let mut timeline = Timeline::new();
        let tween = timeline.add_tween(fade_in(element), false);
        timeline.add_trigger(TriggerKind::Toggle {
            element,
            threshold: 0.8,
            tween,
        });

        // Card top at 1000, line at offset + 640: crossing needs 360.
        run(&mut timeline, &mut stage, 0.0, 10);
        assert_eq!(timeline.tween_progress(tween), Some(0.0));

        run(&mut timeline, &mut stage, 400.0, 120);
        assert_eq!(timeline.tween_progress(tween), Some(1.0));
        assert_eq!(stage.props(element).unwrap().opacity, 1.0);

        // Scrolling back up reverses the reveal.
        run(&mut timeline, &mut stage, 0.0, 120);
        assert_eq!(timeline.tween_progress(tween), Some(0.0));
        assert_eq!(stage.props(element).unwrap().opacity, 0.0);

        // And it replays on re-entry.
        run(&mut timeline, &mut stage, 400.0, 120);
        assert_eq!(stage.props(element).unwrap().opacity, 1.0);
    }

    #[test]
    fn scrub_follows_scroll_not_time() {
        let mut stage = stage_with(vec![ElementSpec::new(ElementRole::ParallaxLayer(1), 0.0)]);
        let element = stage.parallax_layer(1).unwrap();
        let mut timeline = Timeline::new();
        let tween = timeline.add_tween(
            TweenSpec {
                element,
                spans: vec![PropSpan::from_to(Prop::YPercent, 0.0, 10.0)],
                duration: 1.0,
                delay: 0.0,
                ease: Ease::Linear,
            },
            false,
        );
        timeline.add_trigger(TriggerKind::Scrub {
            region: TriggerRegion {
                start: 0.0,
                end: 800.0,
            },
            tween,
        });

        run(&mut timeline, &mut stage, 400.0, 1);
        assert_eq!(stage.props(element).unwrap().y_percent, 5.0);

        // Holding still for many frames does not advance a scrubbed tween.
        run(&mut timeline, &mut stage, 400.0, 60);
        assert_eq!(stage.props(element).unwrap().y_percent, 5.0);

        run(&mut timeline, &mut stage, 2000.0, 1);
        assert_eq!(stage.props(element).unwrap().y_percent, 10.0);
    }

    #[test]
    fn once_trigger_fires_exactly_once() {
        let mut stage = stage_with(vec![ElementSpec::new(
            ElementRole::StatNumber { target: 42 },
            1000.0,
        )]);
        let (element, target) = stage.stat_numbers()[0];
        let mut timeline = Timeline::new();
        timeline.add_trigger(TriggerKind::Once {
            element,
            threshold: 0.8,
            event: TimelineEvent::CountUpStarted {
                element,
                target,
                duration: 1.2,
            },
        });

        let mut fired = Vec::new();
        for offset in [0.0, 400.0, 0.0, 400.0] {
            fired.extend(timeline.step(DT, &scroll(offset), &mut stage));
        }
        assert_eq!(fired.len(), 1);
        assert!(matches!(
            fired[0],
            TimelineEvent::CountUpStarted { target: 42, .. }
        ));
    }

    #[test]
    fn disabled_triggers_and_pause_freeze_everything() {
        let mut stage = card_stage();
        let element = stage.cards()[0];
        let mut timeline = Timeline::new();
        let tween = timeline.add_tween(fade_in(element), false);
        timeline.add_trigger(TriggerKind::Toggle {
            element,
            threshold: 0.8,
            tween,
        });

        timeline.disable_triggers();
        timeline.pause();
        run(&mut timeline, &mut stage, 400.0, 60);
        assert_eq!(timeline.tween_progress(tween), Some(0.0));
        assert!(!timeline.triggers_enabled());
    }

    #[test]
    fn settle_jumps_to_end_state_and_resolves_counters() {
        let mut stage = stage_with(vec![
            ElementSpec::new(ElementRole::Card, 1000.0),
            ElementSpec::new(ElementRole::StatNumber { target: 7 }, 2000.0),
            ElementSpec::new(ElementRole::ParallaxLayer(1), 0.0),
        ]);
        let element = stage.cards()[0];
        let (counter, _) = stage.stat_numbers()[0];
        let layer = stage.parallax_layer(1).unwrap();
        let mut timeline = Timeline::new();
        timeline.add_tween(fade_in(element), false);
        timeline.add_trigger(TriggerKind::Once {
            element: counter,
            threshold: 0.8,
            event: TimelineEvent::CountUpStarted {
                element: counter,
                target: 7,
                duration: 1.2,
            },
        });
        let drift = timeline.add_tween(
            TweenSpec {
                element: layer,
                spans: vec![PropSpan::from_to(Prop::YPercent, 0.0, 10.0)],
                duration: 1.0,
                delay: 0.0,
                ease: Ease::Linear,
            },
            false,
        );
        timeline.add_trigger(TriggerKind::Scrub {
            region: TriggerRegion {
                start: 0.0,
                end: 800.0,
            },
            tween: drift,
        });

        let events = timeline.settle(&mut stage);
        assert_eq!(stage.props(element).unwrap().opacity, 1.0);
        assert_eq!(stage.props(element).unwrap().translate_y, 0.0);
        assert_eq!(events.len(), 1);
        // A scrubbed drift has no end of its own; it stays put.
        assert_eq!(stage.props(layer).unwrap().y_percent, 0.0);
    }

    #[test]
    fn noop_timeline_accepts_everything_quietly() {
        let mut stage = card_stage();
        let element = stage.cards()[0];
        let mut timeline = NoopTimeline::default();
        timeline.set(element, &[(Prop::Opacity, 0.0)], &mut stage);
        assert_eq!(
            stage.props(element).unwrap().opacity,
            1.0,
            "no engine, no hiding"
        );
        let tween = timeline.add_tween(fade_in(element), true);
        timeline.add_trigger(TriggerKind::Toggle {
            element,
            threshold: 0.8,
            tween,
        });
        assert!(timeline.step(DT, &scroll(400.0), &mut stage).is_empty());
        assert!(timeline.settle(&mut stage).is_empty());
    }
}
