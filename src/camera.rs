use crate::state::{Pos, Size};

/// Maps container pixels to window pixels. `x`/`y` is the container point
/// shown at the window centre.
pub struct Camera {
    pub x: f32,
    pub y: f32,
    pub zoom: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub screen_w: f32,
    pub screen_h: f32,
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        Camera {
            x: width * 0.5,
            y: height * 0.5,
            zoom: 1.0,
            min_zoom: 1.0 / 16.0,
            max_zoom: 16.0,
            screen_w: width,
            screen_h: height,
        }
    }

    pub fn on_resize(&mut self, w: f32, h: f32) {
        self.screen_w = w;
        self.screen_h = h;
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Centres the container and zooms so that all of it is visible.
    pub fn fit_container(&mut self, container: Size) {
        self.x = container.w as f32 * 0.5;
        self.y = container.h as f32 * 0.5;
        let zoom = self
            .zoom_to_fit_horizontal(container.w)
            .min(self.zoom_to_fit_vertical(container.h));
        self.set_zoom(zoom);
    }

    pub fn zoom_to_fit_horizontal(&self, pixels: i32) -> f32 {
        if pixels <= 0 {
            return self.max_zoom;
        }
        (self.screen_w / pixels as f32).clamp(self.min_zoom, self.max_zoom)
    }

    pub fn zoom_to_fit_vertical(&self, pixels: i32) -> f32 {
        if pixels <= 0 {
            return self.max_zoom;
        }
        (self.screen_h / pixels as f32).clamp(self.min_zoom, self.max_zoom)
    }

    #[cfg(test)]
    pub fn container_to_screen(&self, x: f32, y: f32) -> (f32, f32) {
        (
            (x - self.x) * self.zoom + self.screen_w * 0.5,
            (y - self.y) * self.zoom + self.screen_h * 0.5,
        )
    }

    pub fn screen_to_container(&self, mouse_x: f32, mouse_y: f32) -> Pos {
        let x = (mouse_x - self.screen_w * 0.5) / self.zoom + self.x;
        let y = (mouse_y - self.screen_h * 0.5) / self.zoom + self.y;
        Pos::new(x.floor() as i32, y.floor() as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_same_size_is_identity() {
        let mut camera = Camera::new(1000.0, 508.0);
        camera.fit_container(Size::new(1000, 508));
        assert_eq!(camera.zoom, 1.0);
        assert_eq!(camera.container_to_screen(0.0, 0.0), (0.0, 0.0));
        assert_eq!(camera.screen_to_container(250.0, 100.0), Pos::new(250, 100));
    }

    #[test]
    fn test_fit_uses_smaller_axis() {
        let mut camera = Camera::new(2000.0, 508.0);
        camera.fit_container(Size::new(1000, 508));
        assert_eq!(camera.zoom, 1.0);

        camera.on_resize(2000.0, 1016.0);
        camera.fit_container(Size::new(1000, 508));
        assert_eq!(camera.zoom, 2.0);
    }

    #[test]
    fn test_screen_to_container_inverts_corners() {
        let mut camera = Camera::new(500.0, 254.0);
        camera.fit_container(Size::new(1000, 508));
        assert_eq!(camera.zoom, 0.5);

        let (sx, sy) = camera.container_to_screen(0.0, 0.0);
        assert_eq!(camera.screen_to_container(sx, sy), Pos::new(0, 0));
        let (sx, sy) = camera.container_to_screen(998.0, 506.0);
        assert_eq!(camera.screen_to_container(sx, sy), Pos::new(998, 506));
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = Camera::new(800.0, 600.0);
        camera.fit_container(Size::new(1, 1));
        assert_eq!(camera.zoom, camera.max_zoom);
    }
}
