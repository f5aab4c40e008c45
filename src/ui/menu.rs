//! Main and settings menus
//!
//! Elements are laid out once on the 1920x1080 base frame. `relayout` maps
//! those logical rects to the window; element state (slider value, choice
//! index) is never rebuilt, so it survives resolution changes.

use glam::Vec2;

use crate::Rect;
use crate::settings::{RESOLUTIONS, Settings};
use crate::viewport::ViewportContext;

const BUTTON_WIDTH: f32 = 300.0;
const BUTTON_HEIGHT: f32 = 80.0;
const BUTTON_SPACING: f32 = 20.0;
/// Slider handle width in logical pixels
const HANDLE_WIDTH: f32 = 20.0;
/// Width of each choice arrow
const ARROW_WIDTH: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementId {
    Play,
    Settings,
    Exit,
    Volume,
    Resolution,
    Back,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Button,
    Slider { min: f32, max: f32, value: f32 },
    /// Arrow selector; the arrows sit at either end of the element
    Choice { values: Vec<String>, index: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: ElementId,
    pub label: &'static str,
    pub kind: ElementKind,
    /// Rect on the base layout
    pub logical: Rect,
    /// Rect in window pixels after the last relayout
    pub screen: Rect,
    pub hovered: bool,
}

impl Element {
    fn new(id: ElementId, label: &'static str, kind: ElementKind, logical: Rect) -> Self {
        Self {
            id,
            label,
            kind,
            logical,
            screen: logical,
            hovered: false,
        }
    }

    /// Slider handle rect in window pixels
    pub fn handle_rect(&self) -> Option<Rect> {
        let ElementKind::Slider { min, max, value } = self.kind else {
            return None;
        };
        let scale = self.screen.size.x / self.logical.size.x;
        let handle = HANDLE_WIDTH * scale;
        let ratio = if max > min { (value - min) / (max - min) } else { 0.0 };
        let x = self.screen.left() + ratio * (self.screen.size.x - handle);
        Some(Rect::new(
            x,
            self.screen.top() - handle * 0.5,
            handle,
            self.screen.size.y + handle,
        ))
    }
}

/// What the caller should do in response to pointer input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuAction {
    Play,
    OpenSettings,
    Exit,
    Back,
    VolumeChanged(f32),
    ResolutionChanged(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
    elements: Vec<Element>,
}

impl Menu {
    /// Play / Settings / Exit, stacked around the centre of the base frame
    pub fn main(viewport: &ViewportContext) -> Self {
        let x = (viewport.logical_size().x - BUTTON_WIDTH) * 0.5;
        let mid = viewport.logical_size().y * 0.5;
        let button = |id, label, y| {
            Element::new(id, label, ElementKind::Button, Rect::new(x, y, BUTTON_WIDTH, BUTTON_HEIGHT))
        };
        let mut menu = Self {
            elements: vec![
                button(ElementId::Play, "Play", mid - BUTTON_HEIGHT - BUTTON_SPACING),
                button(ElementId::Settings, "Settings", mid),
                button(ElementId::Exit, "Exit", mid + BUTTON_HEIGHT + BUTTON_SPACING),
            ],
        };
        menu.relayout(viewport);
        menu
    }

    /// Volume slider, resolution choice and Back, initialised from `settings`
    pub fn settings(settings: &Settings, viewport: &ViewportContext) -> Self {
        let centre = viewport.logical_size() * 0.5;
        let values = RESOLUTIONS.iter().map(|(w, h)| format!("{w}x{h}")).collect();
        let mut menu = Self {
            elements: vec![
                Element::new(
                    ElementId::Volume,
                    "Volume",
                    ElementKind::Slider {
                        min: 0.0,
                        max: 100.0,
                        value: settings.music_volume,
                    },
                    Rect::new(centre.x, centre.y - 80.0, 300.0, 20.0),
                ),
                Element::new(
                    ElementId::Resolution,
                    "Resolution",
                    ElementKind::Choice {
                        values,
                        index: settings.resolution_index(),
                    },
                    Rect::new(centre.x - 50.0, centre.y, 500.0, ARROW_WIDTH),
                ),
                Element::new(
                    ElementId::Back,
                    "Back",
                    ElementKind::Button,
                    Rect::new(
                        centre.x - BUTTON_WIDTH * 0.5,
                        centre.y + 160.0,
                        BUTTON_WIDTH,
                        BUTTON_HEIGHT,
                    ),
                ),
            ],
        };
        menu.relayout(viewport);
        menu
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Recompute every screen rect for a new viewport
    pub fn relayout(&mut self, viewport: &ViewportContext) {
        for element in &mut self.elements {
            element.screen = viewport.logical_rect_to_screen(&element.logical);
        }
    }

    /// Topmost element under a window point
    pub fn hit_test(&self, point: Vec2) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.screen.contains(point))
            .map(|e| e.id)
    }

    pub fn hovered(&self) -> Option<ElementId> {
        self.elements.iter().find(|e| e.hovered).map(|e| e.id)
    }

    pub fn pointer_moved(&mut self, point: Vec2) {
        let hit = self.hit_test(point);
        for element in &mut self.elements {
            element.hovered = Some(element.id) == hit;
        }
    }

    /// Click at a window point
    pub fn pointer_pressed(&mut self, point: Vec2) -> Option<MenuAction> {
        self.pointer_moved(point);
        let id = self.hit_test(point)?;
        let element = self.elements.iter_mut().find(|e| e.id == id)?;
        let screen = element.screen;

        match &mut element.kind {
            ElementKind::Button => match id {
                ElementId::Play => Some(MenuAction::Play),
                ElementId::Settings => Some(MenuAction::OpenSettings),
                ElementId::Exit => Some(MenuAction::Exit),
                ElementId::Back => Some(MenuAction::Back),
                ElementId::Volume | ElementId::Resolution => None,
            },
            ElementKind::Slider { min, max, value } => {
                *value = slider_value(&screen, point.x, *min, *max, element.logical.size.x);
                Some(MenuAction::VolumeChanged(*value))
            }
            ElementKind::Choice { values, index } => {
                let arrow = ARROW_WIDTH * screen.size.y / element.logical.size.y;
                let next = if point.x <= screen.left() + arrow && *index > 0 {
                    *index - 1
                } else if point.x >= screen.right() - arrow && *index + 1 < values.len() {
                    *index + 1
                } else {
                    return None;
                };
                *index = next;
                log::debug!("{} set to {}", element.label, values[next]);
                Some(MenuAction::ResolutionChanged(next))
            }
        }
    }

    /// Pointer moved with the button held; only sliders follow it
    pub fn pointer_dragged(&mut self, point: Vec2) -> Option<MenuAction> {
        self.pointer_moved(point);
        let id = self.hit_test(point)?;
        let element = self.elements.iter_mut().find(|e| e.id == id)?;
        let logical_width = element.logical.size.x;
        let screen = element.screen;
        match &mut element.kind {
            ElementKind::Slider { min, max, value } => {
                *value = slider_value(&screen, point.x, *min, *max, logical_width);
                Some(MenuAction::VolumeChanged(*value))
            }
            _ => None,
        }
    }
}

/// Slider value for a pointer x; the handle is centred on the pointer and
/// kept inside the track
fn slider_value(screen: &Rect, x: f32, min: f32, max: f32, logical_width: f32) -> f32 {
    let handle = HANDLE_WIDTH * screen.size.x / logical_width;
    let travel = screen.size.x - handle;
    if travel <= 0.0 {
        return min;
    }
    let handle_x = (x - handle * 0.5).clamp(screen.left(), screen.right() - handle);
    let ratio = (handle_x - screen.left()) / travel;
    min + ratio * (max - min)
}
