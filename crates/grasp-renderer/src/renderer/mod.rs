//! The viewport renderer
//!
//! Owns the camera, lighting, render targets, and all sub-renderers, and
//! turns the core scene plus interaction state into draw calls.

pub mod camera_controller;
pub mod display_options;
pub mod gpu_resources;
pub mod lighting_system;
pub mod render_pass;

use glam::{Mat4, Vec3};

use grasp_core::CONTROLLER_SLOTS;
use grasp_core::interaction::Interactions;
use grasp_core::mesh::MeshData;
use grasp_core::scene::Scene;

use crate::camera::Camera;
use crate::config::RendererConfig;
use crate::constants::viewport::{CLEAR_COLOR, SAMPLE_COUNT};
use crate::grid::GridRenderer;
use crate::light::DirectionalLight;
use crate::sub_renderers::{
    BoxInstance, BoxRenderer, GpuMesh, MarkerInstance, MarkerRenderer, MeshRenderer, RayInstance,
    RayRenderer, ray_color,
};

pub use camera_controller::CameraController;
pub use display_options::DisplayOptions;
pub use gpu_resources::DEPTH_FORMAT;
pub use lighting_system::LightingSystem;

use render_pass::{MainPassParams, ShadowPassParams, run_main_pass, run_shadow_pass};

/// Renders the sandbox scene into a wgpu texture view.
pub struct Renderer {
    camera_controller: CameraController,
    lighting: LightingSystem,
    display_options: DisplayOptions,
    grid: GridRenderer,
    boxes: BoxRenderer,
    rays: RayRenderer,
    markers: MarkerRenderer,
    mesh_renderer: MeshRenderer,
    showcase: Option<GpuMesh>,
    depth_view: wgpu::TextureView,
    msaa_view: Option<wgpu::TextureView>,
    clear_color: wgpu::Color,
    format: wgpu::TextureFormat,
    scene_center: Vec3,
}

impl Renderer {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let camera_controller =
            CameraController::new(device, width.max(1) as f32 / height.max(1) as f32);
        let lighting = LightingSystem::new(device);

        let camera_layout = camera_controller.bind_group_layout();
        let camera_buffer = camera_controller.buffer();

        let grid = GridRenderer::new(device, format, DEPTH_FORMAT, camera_layout, camera_buffer);
        let boxes = BoxRenderer::new(device, format, DEPTH_FORMAT, camera_layout, camera_buffer);
        let rays = RayRenderer::new(device, format, DEPTH_FORMAT, camera_layout, camera_buffer);
        let markers =
            MarkerRenderer::new(device, format, DEPTH_FORMAT, camera_layout, camera_buffer);
        let mesh_renderer = MeshRenderer::new(
            device,
            format,
            DEPTH_FORMAT,
            camera_layout,
            camera_buffer,
            lighting.bind_group_layout(),
            lighting.shadow_bind_group_layout(),
        );

        let depth_view = gpu_resources::create_depth_texture(device, width, height, SAMPLE_COUNT);
        let msaa_view =
            gpu_resources::create_msaa_texture(device, width, height, format, SAMPLE_COUNT);

        Self {
            camera_controller,
            lighting,
            display_options: DisplayOptions::default(),
            grid,
            boxes,
            rays,
            markers,
            mesh_renderer,
            showcase: None,
            depth_view,
            msaa_view,
            clear_color: CLEAR_COLOR,
            format,
            scene_center: Vec3::ZERO,
        }
    }

    /// Recreate size-dependent resources after a viewport resize.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_view =
            gpu_resources::create_depth_texture(device, width, height, SAMPLE_COUNT);
        self.msaa_view =
            gpu_resources::create_msaa_texture(device, width, height, self.format, SAMPLE_COUNT);
        self.camera_controller.update_aspect(width, height);
    }

    pub fn camera(&self) -> &Camera {
        self.camera_controller.camera()
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        self.camera_controller.camera_mut()
    }

    pub fn light(&self) -> &DirectionalLight {
        self.lighting.light()
    }

    pub fn light_mut(&mut self) -> &mut DirectionalLight {
        self.lighting.light_mut()
    }

    pub fn display_options(&self) -> &DisplayOptions {
        &self.display_options
    }

    pub fn display_options_mut(&mut self) -> &mut DisplayOptions {
        &mut self.display_options
    }

    /// Set the viewport clear color.
    pub fn set_clear_color(&mut self, color: [f32; 3]) {
        self.clear_color = wgpu::Color {
            r: color[0] as f64,
            g: color[1] as f64,
            b: color[2] as f64,
            a: 1.0,
        };
    }

    /// Upload box instances for the scene.
    ///
    /// `highlighted` holds movable box indices (matching contact records)
    /// that render with the selection tint.
    pub fn update_scene(&mut self, queue: &wgpu::Queue, scene: &Scene, highlighted: &[usize]) {
        let mut instances = Vec::with_capacity(scene.boxes().len());
        for b in scene.static_boxes() {
            instances.push(BoxInstance::from_scene_box(b, false));
        }
        for (i, b) in scene.movable_boxes().iter().enumerate() {
            instances.push(BoxInstance::from_scene_box(b, highlighted.contains(&i)));
        }
        self.boxes.update_instances(queue, &instances);

        if let Some((center, _)) = scene.bounding_sphere() {
            self.scene_center = center;
        }
    }

    /// Upload ray and marker instances from the interaction state.
    pub fn update_interactions(
        &mut self,
        queue: &wgpu::Queue,
        interactions: &Interactions,
        ray_length: f32,
        marker_radius: f32,
    ) {
        let mut rays = Vec::new();
        for controller in 0..CONTROLLER_SLOTS {
            if let Some(ray) = interactions.controller_ray(controller) {
                let color = ray_color(controller, interactions.controller_state(controller));
                rays.push(RayInstance::new(&ray, ray_length, color));
            }
        }
        self.rays.update_instances(queue, &rays);

        let markers: Vec<MarkerInstance> = interactions
            .contacts()
            .iter()
            .map(|contact| MarkerInstance::from_contact(contact, marker_radius))
            .collect();
        self.markers.update_instances(queue, &markers);
    }

    /// Upload the showcase mesh.
    pub fn set_showcase_mesh(
        &mut self,
        device: &wgpu::Device,
        mesh: &MeshData,
        transform: Mat4,
        color: [f32; 4],
    ) {
        self.showcase = Some(self.mesh_renderer.upload(device, mesh, transform, color));
    }

    /// Update the showcase mesh transform and color.
    pub fn update_showcase(&self, queue: &wgpu::Queue, transform: Mat4, color: [f32; 4]) {
        if let Some(mesh) = &self.showcase {
            mesh.update(queue, transform, color);
        }
    }

    /// Remove the showcase mesh.
    pub fn clear_showcase_mesh(&mut self) {
        self.showcase = None;
    }

    /// Whether a showcase mesh is loaded.
    pub fn has_showcase_mesh(&self) -> bool {
        self.showcase.is_some()
    }

    /// Apply a settings snapshot to the live renderer.
    pub fn apply_config(&mut self, device: &wgpu::Device, config: &RendererConfig) {
        self.set_clear_color(config.clear_color);
        self.grid
            .rebuild(device, config.grid.size, config.grid.spacing);

        let light = self.lighting.light_mut();
        light.set_direction(Vec3::from_array(config.lighting.direction));
        light.intensity = config.lighting.intensity;
        light.ambient_strength = config.lighting.ambient_strength;
        light.shadows_enabled = config.lighting.shadows_enabled;
        light.shadow_softness = config.lighting.shadow_softness;

        self.camera_controller.camera_mut().fov = config.camera.fov_degrees.to_radians();
    }

    /// Record the shadow and main passes for one frame.
    pub fn render(
        &self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        color_view: &wgpu::TextureView,
    ) {
        self.camera_controller.update(queue);
        self.lighting.update(queue, self.scene_center);

        if self.lighting.light().shadows_enabled {
            run_shadow_pass(
                encoder,
                ShadowPassParams {
                    lighting: &self.lighting,
                    mesh_renderer: &self.mesh_renderer,
                    mesh: self.showcase.as_ref().filter(|_| self.display_options.show_mesh),
                },
            );
        }

        run_main_pass(
            encoder,
            MainPassParams {
                color_view,
                msaa_view: self.msaa_view.as_ref(),
                depth_view: &self.depth_view,
                clear_color: self.clear_color,
                options: self.display_options,
                grid: &self.grid,
                boxes: &self.boxes,
                rays: &self.rays,
                markers: &self.markers,
                mesh_renderer: &self.mesh_renderer,
                mesh: self.showcase.as_ref(),
                light_bind_group: self.lighting.bind_group(),
            },
        );
    }
}
