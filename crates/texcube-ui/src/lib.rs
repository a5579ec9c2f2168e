//! texcube UI: a small immediate-rebuild widget layer on top of
//! `texcube-engine`, plus the property adapters and parameter panel that
//! drive the demo's texture settings.
//!
//! The tree is rebuilt every frame from [`panel::Panel::build`] (or any
//! [`Widget`](widget::Widget)), laid out and painted into the engine's
//! `DrawList` by [`scene::UiScene::frame`], which also routes pointer events:
//!
//! ```rust,ignore
//! let input = UiInput::from_engine(ctx.input, ctx.input_frame);
//! ui.frame(panel.build(), bounds, &input);
//! overlay.render(rctx, target, &mut ui.draw_list, &ui.font_system);
//! ```

pub mod adapter;
pub mod constraints;
pub mod event;
pub mod painter;
pub mod panel;
pub mod scene;
pub mod widget;
pub mod widgets;

pub mod prelude {
    pub use crate::adapter::{Adapter, DegRad, Property, StringToNumber, parse_float};
    pub use crate::constraints::{Constraints, Edges, LayoutCtx};
    pub use crate::event::{EventResult, UiEvent};
    pub use crate::painter::Painter;
    pub use crate::panel::{Controller, Panel};
    pub use crate::scene::{UiInput, UiScene};
    pub use crate::widget::{Element, Widget};
    pub use crate::widgets::{
        container::Container, flex::Column, option_menu::OptionMenu, slider::Slider, text::Text,
    };

    pub use texcube_engine::coords::{Rect, Vec2};
    pub use texcube_engine::paint::Color;
    pub use texcube_engine::text::FontId;
}
