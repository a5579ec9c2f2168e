use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;
use log::{debug, info, warn};
use texcube_engine::coords::Rect;
use texcube_engine::core::{App, AppControl, FrameCtx};
use texcube_engine::input::Key;
use texcube_engine::paint::Color;
use texcube_engine::render::{MeshRenderer, OverlayRenderer};
use texcube_engine::scene3d::{Geometry, Mesh, PerspectiveCamera};
use texcube_engine::texture::{Texture, WrapMode};
use texcube_ui::adapter::{DegRad, Property, StringToNumber};
use texcube_ui::panel::Panel;
use texcube_ui::scene::{UiInput, UiScene};

use crate::config::DemoConfig;
use crate::frame_loop::{spin_meshes, SurfaceSync};

/// Spinning textured cubes with a texture-transform panel on the right.
pub struct CubeDemo {
    camera: PerspectiveCamera,
    surface_sync: SurfaceSync,
    texture: Rc<RefCell<Texture>>,
    meshes: Vec<Mesh>,
    panel: Panel,
    ui: UiScene,
    mesh_renderer: MeshRenderer,
    overlay: OverlayRenderer,
}

impl CubeDemo {
    pub fn new(config: DemoConfig) -> Self {
        info!("loading texture {}", config.texture_path.display());
        let texture = Rc::new(RefCell::new(Texture::load(config.texture_path.clone())));
        Self::with_texture(&config, texture)
    }

    fn with_texture(config: &DemoConfig, texture: Rc<RefCell<Texture>>) -> Self {
        let meshes = cube_row(config.mesh_count, &texture);

        let mut ui = UiScene::new();
        let font = ui.font_system.load_first_available(&config.font_paths);
        if font.is_none() {
            warn!("no panel font found, controls will be unlabelled");
        }
        let mut panel = texture_panel(&texture);
        panel.set_font(font);

        Self {
            camera: config.camera(),
            surface_sync: SurfaceSync::new(),
            texture,
            meshes,
            panel,
            ui,
            mesh_renderer: MeshRenderer::new(),
            overlay: OverlayRenderer::new(),
        }
    }
}

/// `count` unit cubes sharing `texture`, centred on the origin along X.
fn cube_row(count: usize, texture: &Rc<RefCell<Texture>>) -> Vec<Mesh> {
    let spacing = 1.5;
    let first = -(count.saturating_sub(1) as f32) * spacing * 0.5;
    (0..count)
        .map(|i| {
            let mut mesh = Mesh::new(Geometry::cuboid(1.0, 1.0, 1.0), Rc::clone(texture));
            mesh.transform.position = Vec3::new(first + i as f32 * spacing, 0.0, 0.0);
            mesh
        })
        .collect()
}

/// Wrap changes only reach the sampler after the texture is invalidated.
fn needs_update(texture: &Rc<RefCell<Texture>>) -> impl Fn(f64) + 'static {
    let texture = Rc::clone(texture);
    move |_| texture.borrow_mut().mark_needs_update()
}

fn texture_panel(texture: &Rc<RefCell<Texture>>) -> Panel {
    let wrap_modes: Vec<(&str, f64)> = WrapMode::ALL.iter().map(|m| (m.label(), m.code())).collect();
    let t = texture;
    let mut panel = Panel::new();

    panel
        .add_options(
            StringToNumber::new(Property::new(
                t.clone(),
                "wrapS",
                |t| t.transform.wrap_s,
                |t, v| t.transform.wrap_s = v,
            )),
            &wrap_modes,
        )
        .name("texture.wrapS")
        .on_change(needs_update(t));
    panel
        .add_options(
            StringToNumber::new(Property::new(
                t.clone(),
                "wrapT",
                |t| t.transform.wrap_t,
                |t, v| t.transform.wrap_t = v,
            )),
            &wrap_modes,
        )
        .name("texture.wrapT")
        .on_change(needs_update(t));

    panel
        .add(
            Property::new(t.clone(), "repeat.x", |t| t.transform.repeat.x, |t, v| t.transform.repeat.x = v),
            0.0,
            5.0,
        )
        .step(0.01)
        .name("texture.repeat.x");
    panel
        .add(
            Property::new(t.clone(), "repeat.y", |t| t.transform.repeat.y, |t, v| t.transform.repeat.y = v),
            0.0,
            5.0,
        )
        .step(0.01)
        .name("texture.repeat.y");
    panel
        .add(
            Property::new(t.clone(), "offset.x", |t| t.transform.offset.x, |t, v| t.transform.offset.x = v),
            -2.0,
            2.0,
        )
        .step(0.01)
        .name("texture.offset.x");
    panel
        .add(
            Property::new(t.clone(), "offset.y", |t| t.transform.offset.y, |t, v| t.transform.offset.y = v),
            -2.0,
            2.0,
        )
        .step(0.01)
        .name("texture.offset.y");
    panel
        .add(
            Property::new(t.clone(), "center.x", |t| t.transform.center.x, |t, v| t.transform.center.x = v),
            -0.5,
            1.5,
        )
        .step(0.01)
        .name("texture.center.x");
    panel
        .add(
            Property::new(t.clone(), "center.y", |t| t.transform.center.y, |t, v| t.transform.center.y = v),
            -0.5,
            1.5,
        )
        .step(0.01)
        .name("texture.center.y");
    panel
        .add(
            DegRad::new(Property::new(
                t.clone(),
                "rotation",
                |t| t.transform.rotation,
                |t, v| t.transform.rotation = v,
            )),
            -360.0,
            360.0,
        )
        .name("texture.rotation");

    panel
}

impl App for CubeDemo {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.key_pressed(Key::Escape) {
            info!("escape pressed, closing");
            return AppControl::Exit;
        }

        if self.texture.borrow_mut().poll_load() {
            debug!("texture ready, version {}", self.texture.borrow().version());
        }

        let seconds = ctx.time.seconds();

        {
            let mut surface = ctx.surface();
            self.surface_sync.sync(&mut surface, &mut self.camera);
        }
        let size = ctx.gpu.size();
        if size.width == 0 || size.height == 0 {
            return AppControl::Continue;
        }

        spin_meshes(&mut self.meshes, seconds);

        let (w, h) = ctx.window.logical_size();
        let panel_w = self.panel.width().min(w);
        let bounds = Rect::new(w - panel_w, 0.0, panel_w, h);
        let input = UiInput::from_engine(ctx.input, ctx.input_frame);
        self.ui.frame(self.panel.build(), bounds, &input);

        let Self { camera, meshes, ui, mesh_renderer, overlay, .. } = self;
        ctx.render(Color::BLACK, |rctx, target| {
            mesh_renderer.render(rctx, target, camera, meshes);
            overlay.render(rctx, target, &mut ui.draw_list, &ui.font_system);
        })
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use texcube_engine::texture::{CLAMP_TO_EDGE_WRAPPING, REPEAT_WRAPPING};

    use super::*;

    fn demo() -> (CubeDemo, Rc<RefCell<Texture>>) {
        let texture = Rc::new(RefCell::new(Texture::empty()));
        let config = DemoConfig { font_paths: Vec::new(), ..DemoConfig::default() };
        (CubeDemo::with_texture(&config, texture.clone()), texture)
    }

    #[test]
    fn panel_registers_controls_in_order() {
        let (demo, _) = demo();
        let labels: Vec<&str> = demo.panel.controllers().iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            [
                "texture.wrapS",
                "texture.wrapT",
                "texture.repeat.x",
                "texture.repeat.y",
                "texture.offset.x",
                "texture.offset.y",
                "texture.center.x",
                "texture.center.y",
                "texture.rotation",
            ]
        );
    }

    #[test]
    fn wrap_selection_writes_code_and_invalidates() {
        let (demo, texture) = demo();
        let before = texture.borrow().version();
        let wrap_s = &demo.panel.controllers()[0];
        assert_eq!(wrap_s.read(), CLAMP_TO_EDGE_WRAPPING);

        let repeat = WrapMode::ALL.iter().position(|m| *m == WrapMode::Repeat).unwrap_or(0);
        wrap_s.select(repeat);
        assert_eq!(texture.borrow().transform.wrap_s, REPEAT_WRAPPING);
        assert_eq!(texture.borrow().transform.wrap_t, CLAMP_TO_EDGE_WRAPPING);
        assert_eq!(texture.borrow().version(), before + 1);
    }

    #[test]
    fn sliders_write_without_invalidating() {
        let (demo, texture) = demo();
        let before = texture.borrow().version();
        let c = demo.panel.controllers();

        c[2].set_number(2.5);
        c[5].set_number(-9.0);
        c[8].set_number(90.0);

        let t = texture.borrow();
        assert!((t.transform.repeat.x - 2.5).abs() < 1e-12);
        assert_eq!(t.transform.offset.y, -2.0);
        assert!((t.transform.rotation - FRAC_PI_2).abs() < 1e-12);
        assert_eq!(t.version(), before);
    }

    #[test]
    fn rotation_reads_back_in_degrees() {
        let (demo, texture) = demo();
        texture.borrow_mut().transform.rotation = std::f64::consts::PI;
        assert!((demo.panel.controllers()[8].read() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn cubes_are_centred() {
        let texture = Rc::new(RefCell::new(Texture::empty()));
        let one = cube_row(1, &texture);
        assert_eq!(one[0].transform.position, Vec3::ZERO);
        let three = cube_row(3, &texture);
        assert_eq!(three[0].transform.position.x, -1.5);
        assert_eq!(three[2].transform.position.x, 1.5);
    }
}
