use serde::{Deserialize, Serialize};

/// Stable handle to a stage element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(usize);

impl ElementId {
    #[cfg(test)]
    pub(crate) fn test(index: usize) -> Self {
        Self(index)
    }
}

/// What a stage element is, mirroring the host page contract. Every role is
/// optional: a stage missing one simply skips the dependent feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementRole {
    /// Footer element showing the current year.
    YearDisplay,
    /// Microphone opt-in control.
    AudioToggle,
    /// Custom cursor dot.
    CursorDot,
    /// Headline line taking part in the kinetic entrance.
    KineticLine,
    /// Lede paragraph under the headline.
    Lede,
    /// Call-to-action button.
    CtaButton,
    /// Hero parallax layer, numbered 1..=3.
    ParallaxLayer(u8),
    /// Work card revealed on scroll.
    Card,
    /// Stat counter with its numeric target.
    StatNumber { target: u64 },
    /// Process step tile with the hover tilt.
    StepTile,
}

/// Mutable visual properties animated on an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementProps {
    pub opacity: f32,
    /// Vertical offset as a percentage of the element's own height.
    pub y_percent: f32,
    pub translate_x: f32,
    pub translate_y: f32,
    /// 2D rotation in degrees.
    pub rotation: f32,
    /// Tilt around the x/y axes in degrees, for the hover effect.
    pub tilt_x: f32,
    pub tilt_y: f32,
    pub scale: f32,
    pub visible: bool,
    /// Toggle state mirrored to the host (aria-checked).
    pub checked: bool,
    /// Visible error marker, set when a capability request fails.
    pub error: bool,
    pub text: String,
}

impl Default for ElementProps {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            y_percent: 0.0,
            translate_x: 0.0,
            translate_y: 0.0,
            rotation: 0.0,
            tilt_x: 0.0,
            tilt_y: 0.0,
            scale: 1.0,
            visible: true,
            checked: false,
            error: false,
            text: String::new(),
        }
    }
}

/// Declarative description of one element: its role and its offset from the
/// top of the document, which is all the trigger engine needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSpec {
    pub role: ElementRole,
    pub top: f32,
}

impl ElementSpec {
    pub fn new(role: ElementRole, top: f32) -> Self {
        Self { role, top }
    }
}

/// Serializable page description used to build a [`Stage`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageDescriptor {
    pub elements: Vec<ElementSpec>,
}

impl StageDescriptor {
    /// The canonical demo page: a hero with three kinetic lines, lede and
    /// two CTA buttons, three parallax layers, a work grid, process steps
    /// and a stats row.
    pub fn portfolio_demo() -> Self {
        use ElementRole::*;
        let elements = vec![
            ElementSpec::new(YearDisplay, 3200.0),
            ElementSpec::new(AudioToggle, 0.0),
            ElementSpec::new(CursorDot, 0.0),
            ElementSpec::new(KineticLine, 180.0),
            ElementSpec::new(KineticLine, 260.0),
            ElementSpec::new(KineticLine, 340.0),
            ElementSpec::new(Lede, 440.0),
            ElementSpec::new(CtaButton, 540.0),
            ElementSpec::new(CtaButton, 540.0),
            ElementSpec::new(ParallaxLayer(1), 0.0),
            ElementSpec::new(ParallaxLayer(2), 0.0),
            ElementSpec::new(ParallaxLayer(3), 0.0),
            ElementSpec::new(Card, 1400.0),
            ElementSpec::new(Card, 1450.0),
            ElementSpec::new(Card, 1500.0),
            ElementSpec::new(StepTile, 2000.0),
            ElementSpec::new(StepTile, 2050.0),
            ElementSpec::new(StepTile, 2100.0),
            ElementSpec::new(StatNumber { target: 12 }, 2600.0),
            ElementSpec::new(StatNumber { target: 48 }, 2600.0),
            ElementSpec::new(StatNumber { target: 1234 }, 2600.0),
        ];
        Self { elements }
    }
}

/// One realized element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub role: ElementRole,
    pub top: f32,
    pub props: ElementProps,
}

/// The set of page elements the engine animates.
///
/// Lookup helpers return options and empty vectors rather than errors;
/// absence of any element is tolerated by design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    elements: Vec<Element>,
}

impl Stage {
    pub fn new(descriptor: &StageDescriptor) -> Self {
        let elements = descriptor
            .elements
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let mut props = ElementProps::default();
                if let ElementRole::StatNumber { .. } = spec.role {
                    props.text = "0".to_string();
                }
                Element {
                    id: ElementId(index),
                    role: spec.role,
                    top: spec.top,
                    props,
                }
            })
            .collect();
        Self { elements }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn props(&self, id: ElementId) -> Option<&ElementProps> {
        self.get(id).map(|element| &element.props)
    }

    pub fn props_mut(&mut self, id: ElementId) -> Option<&mut ElementProps> {
        self.elements.get_mut(id.0).map(|element| &mut element.props)
    }

    pub fn top(&self, id: ElementId) -> Option<f32> {
        self.get(id).map(|element| element.top)
    }

    fn ids_where<F>(&self, keep: F) -> Vec<ElementId>
    where
        F: Fn(&ElementRole) -> bool,
    {
        self.elements
            .iter()
            .filter(|element| keep(&element.role))
            .map(|element| element.id)
            .collect()
    }

    fn single(&self, role: ElementRole) -> Option<ElementId> {
        self.elements
            .iter()
            .find(|element| element.role == role)
            .map(|element| element.id)
    }

    pub fn year_display(&self) -> Option<ElementId> {
        self.single(ElementRole::YearDisplay)
    }

    pub fn audio_toggle(&self) -> Option<ElementId> {
        self.single(ElementRole::AudioToggle)
    }

    pub fn cursor_dot(&self) -> Option<ElementId> {
        self.single(ElementRole::CursorDot)
    }

    pub fn kinetic_lines(&self) -> Vec<ElementId> {
        self.ids_where(|role| matches!(role, ElementRole::KineticLine))
    }

    pub fn lede(&self) -> Option<ElementId> {
        self.single(ElementRole::Lede)
    }

    pub fn cta_buttons(&self) -> Vec<ElementId> {
        self.ids_where(|role| matches!(role, ElementRole::CtaButton))
    }

    pub fn parallax_layer(&self, layer: u8) -> Option<ElementId> {
        self.single(ElementRole::ParallaxLayer(layer))
    }

    pub fn cards(&self) -> Vec<ElementId> {
        self.ids_where(|role| matches!(role, ElementRole::Card))
    }

    pub fn step_tiles(&self) -> Vec<ElementId> {
        self.ids_where(|role| matches!(role, ElementRole::StepTile))
    }

    pub fn stat_numbers(&self) -> Vec<(ElementId, u64)> {
        self.elements
            .iter()
            .filter_map(|element| match element.role {
                ElementRole::StatNumber { target } => Some((element.id, target)),
                _ => None,
            })
            .collect()
    }

    /// Serializes the element states, the shape the headless snapshot
    /// command emits.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the current year into the year display, when one exists.
    pub fn set_year(&mut self, year: i32) {
        if let Some(id) = self.year_display() {
            if let Some(props) = self.props_mut(id) {
                props.text = year.to_string();
            }
        }
    }
}
