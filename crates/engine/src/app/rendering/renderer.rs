use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use crate::app::overlay::draw_overlay;
use crate::app::{OverlayData, Scene, Viewport};

use super::Canvas;

const CLEAR_COLOR: [u8; 4] = [0, 0, 0, 255];

pub(crate) struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    viewport: Viewport,
}

impl Renderer {
    pub(crate) fn new(window: Arc<Window>) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(Arc::clone(&window), size.width, size.height)?;
        Ok(Self {
            window,
            pixels,
            viewport: Viewport {
                width: size.width,
                height: size.height,
            },
        })
    }

    pub(crate) fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub(crate) fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(Arc::clone(&self.window), width, height)?;
        self.viewport = Viewport { width, height };
        Ok(())
    }

    fn build_pixels(
        window: Arc<Window>,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(width, height, window);
        Pixels::new(width, height, surface)
    }

    /// Lets the scene paint the whole frame, draws the debug overlay on top,
    /// then presents.
    pub(crate) fn render_scene(
        &mut self,
        scene: &mut dyn Scene,
        overlay_data: Option<&OverlayData>,
    ) -> Result<(), Error> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Ok(());
        }

        {
            let frame = self.pixels.frame_mut();
            let mut canvas = Canvas::new(frame, self.viewport.width, self.viewport.height);
            canvas.clear(CLEAR_COLOR);
            scene.render(&mut canvas);
            if let Some(overlay_data) = overlay_data {
                draw_overlay(&mut canvas, overlay_data);
            }
        }

        self.pixels.render()
    }
}
