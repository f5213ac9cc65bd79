use glow::HasContext;

use super::camera::OrbitCamera;
use super::mesh::{self, LineMeshData, MeshData};
use crate::state::settings::{AxisSettings, GridSettings};
use crate::state::SceneObject;

// ── Render parameters ────────────────────────────────────────

/// Parameters for rendering the viewport
#[derive(Clone, Copy)]
pub struct RenderParams {
    /// Viewport rectangle [x, y, width, height] in pixels
    pub viewport: [f32; 4],
    /// Show grid
    pub grid_visible: bool,
    /// Show axes
    pub axes_visible: bool,
    /// Axis line thickness
    pub axes_thickness: f32,
    /// Background color RGB
    pub bg_color: [u8; 3],
}

// ── GPU mesh handles ─────────────────────────────────────────

struct GpuMesh {
    vao: glow::VertexArray,
    _vbo: glow::Buffer,
    ibo: glow::Buffer,
    index_count: i32,
}

struct GpuLines {
    vao: glow::VertexArray,
    _vbo: glow::Buffer,
    vertex_count: i32,
}

// ── Main GL renderer ─────────────────────────────────────────

/// Draws the current model plus grid/axes overlays every frame.
///
/// GPU uploads happen only when the corresponding CPU data changed: the
/// grid/axes when their settings change, the model when the scene slot's
/// version moves.
pub struct GlRenderer {
    mesh_program: glow::Program,
    line_program: glow::Program,
    grid: Option<GpuLines>,
    axes: Option<GpuLines>,
    /// Cached grid settings to detect changes
    cached_grid_settings: Option<GridSettings>,
    /// Cached axes length to detect changes
    cached_axes_length: Option<f32>,
    /// GPU buffers of the displayed model, one per mesh node
    model_meshes: Vec<GpuMesh>,
    /// Material uniforms of the displayed model
    model_material: [f32; 2],
    /// Scene-slot version last uploaded
    synced_version: Option<u64>,
}

impl GlRenderer {
    pub fn new(gl: &glow::Context) -> Self {
        let mesh_program = compile_program(gl, MESH_VERT, MESH_FRAG);
        let line_program = compile_program(gl, LINE_VERT, LINE_FRAG);

        Self {
            mesh_program,
            line_program,
            grid: None,
            axes: None,
            cached_grid_settings: None,
            cached_axes_length: None,
            model_meshes: Vec::new(),
            model_material: [0.5, 0.5],
            synced_version: None,
        }
    }

    /// Update grid mesh based on settings
    pub fn update_grid(&mut self, gl: &glow::Context, settings: &GridSettings) {
        if self.cached_grid_settings.as_ref() == Some(settings) {
            return;
        }

        if let Some(old) = self.grid.take() {
            unsafe {
                gl.delete_vertex_array(old.vao);
                gl.delete_buffer(old._vbo);
            }
        }

        let grid_data = mesh::grid(
            settings.cell_size,
            settings.range,
            settings.section_every,
            settings.opacity,
        );
        self.grid = Some(upload_lines(gl, &grid_data));
        self.cached_grid_settings = Some(settings.clone());
    }

    /// Update axes mesh based on settings
    pub fn update_axes(&mut self, gl: &glow::Context, settings: &AxisSettings) {
        if self.cached_axes_length == Some(settings.length) {
            return;
        }

        if let Some(old) = self.axes.take() {
            unsafe {
                gl.delete_vertex_array(old.vao);
                gl.delete_buffer(old._vbo);
            }
        }

        let axes_data = mesh::axes(settings.length);
        self.axes = Some(upload_lines(gl, &axes_data));
        self.cached_axes_length = Some(settings.length);
    }

    /// Upload the displayed model's meshes, replacing the previous ones.
    /// No-op while `version` matches the last synced version.
    pub fn sync_model(&mut self, gl: &glow::Context, model: Option<&SceneObject>, version: u64) {
        if self.synced_version == Some(version) {
            return;
        }
        self.synced_version = Some(version);

        for old in self.model_meshes.drain(..) {
            unsafe {
                gl.delete_vertex_array(old.vao);
                gl.delete_buffer(old._vbo);
                gl.delete_buffer(old.ibo);
            }
        }

        if let Some(model) = model {
            self.model_material = [model.material.metalness, model.material.roughness];
            for mesh_data in &model.meshes {
                self.model_meshes.push(upload_mesh(gl, mesh_data));
            }
        }
    }

    /// Render the scene
    pub fn paint(&self, gl: &glow::Context, camera: &OrbitCamera, params: &RenderParams) {
        let aspect = params.viewport[2] / params.viewport[3];
        let vp = camera.view_projection(aspect);

        unsafe {
            gl.viewport(
                params.viewport[0] as i32,
                params.viewport[1] as i32,
                params.viewport[2] as i32,
                params.viewport[3] as i32,
            );
            gl.scissor(
                params.viewport[0] as i32,
                params.viewport[1] as i32,
                params.viewport[2] as i32,
                params.viewport[3] as i32,
            );
            gl.enable(glow::SCISSOR_TEST);

            gl.clear_color(
                params.bg_color[0] as f32 / 255.0,
                params.bg_color[1] as f32 / 255.0,
                params.bg_color[2] as f32 / 255.0,
                1.0,
            );
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);

            gl.enable(glow::DEPTH_TEST);
            gl.depth_func(glow::LESS);

            // Grid and axes (lines)
            gl.use_program(Some(self.line_program));
            set_uniform_mat4(gl, self.line_program, "u_mvp", &vp);

            if params.grid_visible {
                if let Some(ref grid) = self.grid {
                    draw_lines(gl, grid);
                }
            }

            if params.axes_visible {
                if let Some(ref axes) = self.axes {
                    gl.line_width(params.axes_thickness);
                    draw_lines(gl, axes);
                    gl.line_width(1.0);
                }
            }

            // Displayed model
            gl.use_program(Some(self.mesh_program));
            set_uniform_mat4(gl, self.mesh_program, "u_mvp", &vp);

            // Key light direction: high and to the side, matching the
            // viewer's staging.
            let light_dir = glam::Vec3::new(1.0, 1.0, 1.0).normalize();
            set_uniform_vec3(gl, self.mesh_program, "u_light_dir", &light_dir);
            set_uniform_vec2(gl, self.mesh_program, "u_material", self.model_material);

            for mesh in &self.model_meshes {
                draw_mesh(gl, mesh);
            }

            gl.disable(glow::DEPTH_TEST);
            gl.disable(glow::SCISSOR_TEST);
            gl.use_program(None);
        }
    }

    #[allow(dead_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_program(self.mesh_program);
            gl.delete_program(self.line_program);
            if let Some(ref grid) = self.grid {
                gl.delete_vertex_array(grid.vao);
                gl.delete_buffer(grid._vbo);
            }
            if let Some(ref axes) = self.axes {
                gl.delete_vertex_array(axes.vao);
                gl.delete_buffer(axes._vbo);
            }
            for mesh in &self.model_meshes {
                gl.delete_vertex_array(mesh.vao);
                gl.delete_buffer(mesh._vbo);
                gl.delete_buffer(mesh.ibo);
            }
        }
    }
}

// ── GPU upload ───────────────────────────────────────────────

fn upload_mesh(gl: &glow::Context, data: &MeshData) -> GpuMesh {
    unsafe {
        let vao = gl.create_vertex_array().unwrap();
        gl.bind_vertex_array(Some(vao));

        let vbo = gl.create_buffer().unwrap();
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            cast_slice(&data.vertices),
            glow::STATIC_DRAW,
        );

        let stride = 9 * 4; // 9 floats * 4 bytes
        // position: location 0
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
        // normal: location 1
        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_f32(1, 3, glow::FLOAT, false, stride, 3 * 4);
        // color: location 2
        gl.enable_vertex_attrib_array(2);
        gl.vertex_attrib_pointer_f32(2, 3, glow::FLOAT, false, stride, 6 * 4);

        let ibo = gl.create_buffer().unwrap();
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ibo));
        gl.buffer_data_u8_slice(
            glow::ELEMENT_ARRAY_BUFFER,
            cast_slice(&data.indices),
            glow::STATIC_DRAW,
        );

        gl.bind_vertex_array(None);

        GpuMesh {
            vao,
            _vbo: vbo,
            ibo,
            index_count: data.indices.len() as i32,
        }
    }
}

fn upload_lines(gl: &glow::Context, data: &LineMeshData) -> GpuLines {
    unsafe {
        let vao = gl.create_vertex_array().unwrap();
        gl.bind_vertex_array(Some(vao));

        let vbo = gl.create_buffer().unwrap();
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            cast_slice(&data.vertices),
            glow::STATIC_DRAW,
        );

        let stride = 7 * 4; // 7 floats * 4 bytes
        // position: location 0
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
        // color: location 1
        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_f32(1, 4, glow::FLOAT, false, stride, 3 * 4);

        gl.bind_vertex_array(None);

        GpuLines {
            vao,
            _vbo: vbo,
            vertex_count: (data.vertices.len() / 7) as i32,
        }
    }
}

// ── Draw calls ───────────────────────────────────────────────

unsafe fn draw_mesh(gl: &glow::Context, mesh: &GpuMesh) {
    gl.bind_vertex_array(Some(mesh.vao));
    gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(mesh.ibo));
    gl.draw_elements(glow::TRIANGLES, mesh.index_count, glow::UNSIGNED_INT, 0);
    gl.bind_vertex_array(None);
}

unsafe fn draw_lines(gl: &glow::Context, lines: &GpuLines) {
    gl.bind_vertex_array(Some(lines.vao));
    gl.draw_arrays(glow::LINES, 0, lines.vertex_count);
    gl.bind_vertex_array(None);
}

// ── Shader compilation ───────────────────────────────────────

fn compile_program(gl: &glow::Context, vert_src: &str, frag_src: &str) -> glow::Program {
    unsafe {
        let program = gl.create_program().unwrap();

        let vert = gl.create_shader(glow::VERTEX_SHADER).unwrap();
        gl.shader_source(vert, vert_src);
        gl.compile_shader(vert);
        if !gl.get_shader_compile_status(vert) {
            let log = gl.get_shader_info_log(vert);
            tracing::error!("Vertex shader error: {log}");
        }

        let frag = gl.create_shader(glow::FRAGMENT_SHADER).unwrap();
        gl.shader_source(frag, frag_src);
        gl.compile_shader(frag);
        if !gl.get_shader_compile_status(frag) {
            let log = gl.get_shader_info_log(frag);
            tracing::error!("Fragment shader error: {log}");
        }

        gl.attach_shader(program, vert);
        gl.attach_shader(program, frag);
        gl.link_program(program);
        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            tracing::error!("Program link error: {log}");
        }

        gl.delete_shader(vert);
        gl.delete_shader(frag);

        program
    }
}

// ── Uniform setters ──────────────────────────────────────────

fn set_uniform_mat4(gl: &glow::Context, program: glow::Program, name: &str, mat: &glam::Mat4) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_matrix_4_f32_slice(loc.as_ref(), false, &mat.to_cols_array());
    }
}

fn set_uniform_vec3(gl: &glow::Context, program: glow::Program, name: &str, v: &glam::Vec3) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_3_f32(loc.as_ref(), v.x, v.y, v.z);
    }
}

fn set_uniform_vec2(gl: &glow::Context, program: glow::Program, name: &str, v: [f32; 2]) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_2_f32(loc.as_ref(), v[0], v[1]);
    }
}

// ── Byte cast helper ─────────────────────────────────────────

fn cast_slice<T: Copy>(slice: &[T]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(slice.as_ptr() as *const u8, std::mem::size_of_val(slice)) }
}

// ── Shaders ──────────────────────────────────────────────────

const MESH_VERT: &str = r#"#version 330 core
uniform mat4 u_mvp;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
layout(location = 2) in vec3 a_color;

out vec3 v_normal;
out vec3 v_color;

void main() {
    gl_Position = u_mvp * vec4(a_position, 1.0);
    v_normal = a_normal;
    v_color = a_color;
}
"#;

const MESH_FRAG: &str = r#"#version 330 core
uniform vec3 u_light_dir;
uniform vec2 u_material; // x = metalness, y = roughness

in vec3 v_normal;
in vec3 v_color;

out vec4 frag_color;

void main() {
    vec3 n = normalize(v_normal);
    float diffuse = max(dot(n, u_light_dir), 0.0);
    float ambient = 0.3;
    float light = ambient + diffuse * 0.7;

    // Cheap highlight shaped by the uniform material: metalness scales it,
    // roughness widens it.
    vec3 half_dir = normalize(u_light_dir + vec3(0.0, 0.0, 1.0));
    float shininess = mix(48.0, 8.0, u_material.y);
    float spec = pow(max(dot(n, half_dir), 0.0), shininess) * u_material.x * 0.5;

    frag_color = vec4(v_color * light + vec3(spec), 1.0);
}
"#;

const LINE_VERT: &str = r#"#version 330 core
uniform mat4 u_mvp;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec4 a_color;

out vec4 v_color;

void main() {
    gl_Position = u_mvp * vec4(a_position, 1.0);
    v_color = a_color;
}
"#;

const LINE_FRAG: &str = r#"#version 330 core
in vec4 v_color;
out vec4 frag_color;

void main() {
    frag_color = v_color;
}
"#;
