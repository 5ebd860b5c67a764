use crate::camera::Camera;
use crate::state::{Bouncer, Scene};

use image::GenericImageView;
use miniquad::{
    Bindings, BlendFactor, BlendState, BlendValue, BufferLayout, BufferSource, BufferType,
    BufferUsage, CullFace, Equation, FilterMode, MipmapFilterMode, PassAction, Pipeline,
    PipelineParams, RenderingBackend, ShaderMeta, ShaderSource, TextureId, TextureWrap,
    UniformBlockLayout, UniformDesc, UniformType, UniformsSource, VertexAttribute, VertexFormat,
    window,
};
use std::path::Path;

#[repr(C)]
struct Uniforms {
    mvp: [f32; 16],
    color: [f32; 4],
}

#[repr(C)]
struct Vertex {
    pos: [f32; 2],
    uv: [f32; 2],
}

const CLEAR_COLOR: (f32, f32, f32, f32) = (0.08, 0.09, 0.10, 1.0);
const CONTAINER_COLOR: [f32; 4] = [0.93, 0.93, 0.90, 1.0];
const BORDER_COLOR: [f32; 4] = [0.35, 0.35, 0.38, 1.0];
const BORDER_WIDTH: f32 = 2.0;

struct TextureInfo {
    w: f32,
    h: f32,
    texture: TextureId,
}

fn load_texture(
    ctx: &mut Box<dyn RenderingBackend>,
    path: &Path,
) -> Result<TextureInfo, image::ImageError> {
    let img = image::open(path)?;
    let (w, h) = img.dimensions();
    let rgba8 = img.to_rgba8();
    let texture = ctx.new_texture_from_rgba8(w as u16, h as u16, &rgba8);
    ctx.texture_set_filter(texture, FilterMode::Linear, MipmapFilterMode::None);
    ctx.texture_set_wrap(texture, TextureWrap::Clamp, TextureWrap::Clamp);

    Ok(TextureInfo {
        w: w as f32,
        h: h as f32,
        texture,
    })
}

pub struct Renderer {
    pub ctx: Box<dyn RenderingBackend>,
    pipeline: Pipeline,
    bindings: Bindings,
    white: TextureId,
    sprite: Option<TextureInfo>,
}

impl Renderer {
    pub fn new(sprite_path: Option<&Path>) -> Renderer {
        let mut ctx = window::new_rendering_backend();

        // unit quad with UVs (0..1)
        let vertices: [Vertex; 4] = [
            Vertex {
                pos: [0.0, 0.0],
                uv: [0.0, 0.0],
            },
            Vertex {
                pos: [1.0, 0.0],
                uv: [1.0, 0.0],
            },
            Vertex {
                pos: [1.0, 1.0],
                uv: [1.0, 1.0],
            },
            Vertex {
                pos: [0.0, 1.0],
                uv: [0.0, 1.0],
            },
        ];
        let indices: [u16; 6] = [0, 1, 2, 0, 2, 3];

        let vertex_buffer = ctx.new_buffer(
            BufferType::VertexBuffer,
            BufferUsage::Immutable,
            BufferSource::slice(&vertices),
        );
        let index_buffer = ctx.new_buffer(
            BufferType::IndexBuffer,
            BufferUsage::Immutable,
            BufferSource::slice(&indices),
        );

        // 1x1 white texture for solid rectangles
        let white_tex_bytes: [u8; 4] = [255, 255, 255, 255];
        let white = ctx.new_texture_from_rgba8(1, 1, &white_tex_bytes);
        ctx.texture_set_filter(white, FilterMode::Nearest, MipmapFilterMode::None);
        ctx.texture_set_wrap(white, TextureWrap::Clamp, TextureWrap::Clamp);

        let shader = ctx
            .new_shader(
                ShaderSource::Glsl {
                    vertex: VERTEX_SHADER,
                    fragment: FRAGMENT_SHADER,
                },
                ShaderMeta {
                    images: vec!["tex".to_string()],
                    uniforms: UniformBlockLayout {
                        uniforms: vec![
                            UniformDesc::new("mvp", UniformType::Mat4),
                            UniformDesc::new("color", UniformType::Float4),
                        ],
                    },
                },
            )
            .expect("failed to compile shader");

        let pipeline = ctx.new_pipeline(
            &[BufferLayout::default()],
            &[
                VertexAttribute::new("pos", VertexFormat::Float2),
                VertexAttribute::new("uv", VertexFormat::Float2),
            ],
            shader,
            PipelineParams {
                color_blend: Some(BlendState::new(
                    Equation::Add,
                    BlendFactor::Value(BlendValue::SourceAlpha),
                    BlendFactor::OneMinusValue(BlendValue::SourceAlpha),
                )),
                cull_face: CullFace::Nothing,
                ..Default::default()
            },
        );

        let sprite = sprite_path.and_then(|path| match load_texture(&mut ctx, path) {
            Ok(info) => {
                log::info!(
                    "loaded sprite {} ({}x{})",
                    path.display(),
                    info.w,
                    info.h
                );
                Some(info)
            }
            Err(err) => {
                log::warn!("sprite {} not loaded, drawing a plain box: {}", path.display(), err);
                None
            }
        });

        let bindings = Bindings {
            vertex_buffers: vec![vertex_buffer],
            index_buffer,
            images: vec![white],
        };

        Renderer {
            ctx,
            pipeline,
            bindings,
            white,
            sprite,
        }
    }

    /// Draws the container and its bouncers. The frame is committed by the caller.
    pub fn draw(&mut self, scene: &Scene, camera: &Camera) {
        let clear = PassAction::Clear {
            color: Some(CLEAR_COLOR),
            depth: Some(1.0),
            stencil: None,
        };

        self.ctx.begin_default_pass(clear);
        self.ctx.apply_pipeline(&self.pipeline);

        let container = scene.container();
        let (cw, ch) = (container.w as f32, container.h as f32);
        let b = BORDER_WIDTH / camera.zoom;

        self.draw_rect(camera, -b, -b, cw + 2.0 * b, ch + 2.0 * b, BORDER_COLOR);
        self.draw_rect(camera, 0.0, 0.0, cw, ch, CONTAINER_COLOR);

        for bouncer in scene.bouncers() {
            self.draw_bouncer(camera, bouncer);
        }

        self.ctx.end_render_pass();
    }

    fn draw_bouncer(&mut self, camera: &Camera, bouncer: &Bouncer) {
        let pos = bouncer.pos();
        let size = bouncer.size();
        let (x, y, w, h) = (pos.x as f32, pos.y as f32, size.w as f32, size.h as f32);

        match self.sprite.as_ref().map(|s| s.texture) {
            Some(texture) => self.draw_quad(camera, texture, x, y, w, h, [1.0, 1.0, 1.0, 1.0]),
            None => self.draw_rect(camera, x, y, w, h, bouncer.color),
        }
    }

    fn draw_rect(&mut self, camera: &Camera, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
        self.draw_quad(camera, self.white, x, y, w, h, color);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_quad(
        &mut self,
        camera: &Camera,
        texture: TextureId,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: [f32; 4],
    ) {
        self.bindings.images[0] = texture;
        self.ctx.apply_bindings(&self.bindings);

        let view = Self::camera_view(camera);
        let proj = Self::ortho_mvp(camera);
        let model = Self::mat4_mul(Self::mat4_translation(x, y), Self::mat4_scale(w, h));
        let vp = Self::mat4_mul(proj, view);
        let mvp = Self::mat4_mul(vp, model);

        let uniforms = Uniforms { mvp, color };
        self.ctx.apply_uniforms(UniformsSource::table(&uniforms));
        self.ctx.draw(0, 6, 1);
    }

    fn ortho_mvp(camera: &Camera) -> [f32; 16] {
        let l = 0.0;
        let r = camera.screen_w;
        let t = 0.0;
        let b = camera.screen_h;
        let n = -1.0;
        let f = 1.0;
        let sx = 2.0 / (r - l);
        let sy = 2.0 / (t - b);
        let sz = -2.0 / (f - n);
        let tx = -((r + l) / (r - l));
        let ty = -((t + b) / (t - b));
        let tz = -((f + n) / (f - n));
        [
            sx, 0.0, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 0.0, sz, 0.0, tx, ty, tz, 1.0,
        ]
    }

    // Same transform as Camera::container_to_screen.
    fn camera_view(camera: &Camera) -> [f32; 16] {
        let translate_to_origin = Self::mat4_translation(-camera.x, -camera.y);
        let scale_zoom = Self::mat4_scale(camera.zoom, camera.zoom);
        let translate_to_screen_center =
            Self::mat4_translation(camera.screen_w * 0.5, camera.screen_h * 0.5);

        let ts = Self::mat4_mul(scale_zoom, translate_to_origin);
        Self::mat4_mul(translate_to_screen_center, ts)
    }

    fn mat4_mul(a: [f32; 16], b: [f32; 16]) -> [f32; 16] {
        let mut out = [0.0f32; 16];
        for row in 0..4 {
            for col in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += a[k * 4 + row] * b[col * 4 + k];
                }
                out[col * 4 + row] = sum;
            }
        }
        out
    }

    fn mat4_translation(tx: f32, ty: f32) -> [f32; 16] {
        [
            1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, tx, ty, 0.0, 1.0,
        ]
    }

    fn mat4_scale(sx: f32, sy: f32) -> [f32; 16] {
        [
            sx, 0.0, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
        ]
    }
}

const VERTEX_SHADER: &str = r#"#version 100
attribute vec2 pos;
attribute vec2 uv;
uniform mat4 mvp;
uniform vec4 color;
varying vec4 v_color;
varying vec2 v_uv;
void main() {
    gl_Position = mvp * vec4(pos, 0.0, 1.0);
    v_color = color;
    v_uv = uv;
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 100
precision mediump float;
varying vec4 v_color;
varying vec2 v_uv;
uniform sampler2D tex;
void main() {
    gl_FragColor = texture2D(tex, v_uv) * v_color;
}
"#;
