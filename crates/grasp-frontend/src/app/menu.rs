//! Menu bar rendering

use grasp_core::SNAPSHOT_EXTENSION;
use grasp_core::scene::SceneParams;

use crate::state::{AppAction, SharedAppState};
use crate::theme::UiTheme;

/// Render the menu bar and return any triggered action
pub fn render_menu_bar(ctx: &egui::Context, app_state: &SharedAppState) -> Option<MenuAction> {
    let mut menu_action = None;

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("New Scene").clicked() {
                    app_state
                        .lock()
                        .queue_action(AppAction::RegenerateScene(SceneParams::default()));
                    ui.close_menu();
                }
                #[cfg(not(target_arch = "wasm32"))]
                {
                    if ui.button("Open Snapshot...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Grasp Snapshot", &[SNAPSHOT_EXTENSION])
                            .pick_file()
                        {
                            app_state.lock().queue_action(AppAction::LoadSnapshot(path));
                        }
                        ui.close_menu();
                    }
                    if ui.button("Save Snapshot").clicked() {
                        let has_path = app_state.lock().snapshot_path.is_some();
                        if has_path {
                            app_state.lock().queue_action(AppAction::SaveSnapshot(None));
                        } else if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Grasp Snapshot", &[SNAPSHOT_EXTENSION])
                            .set_file_name(format!("scene.{}", SNAPSHOT_EXTENSION))
                            .save_file()
                        {
                            app_state
                                .lock()
                                .queue_action(AppAction::SaveSnapshot(Some(path)));
                        }
                        ui.close_menu();
                    }
                    if ui.button("Save Snapshot As...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Grasp Snapshot", &[SNAPSHOT_EXTENSION])
                            .set_file_name(format!("scene.{}", SNAPSHOT_EXTENSION))
                            .save_file()
                        {
                            app_state
                                .lock()
                                .queue_action(AppAction::SaveSnapshot(Some(path)));
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Load Mesh...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("OBJ files", &["obj", "OBJ"])
                            .pick_file()
                        {
                            app_state
                                .lock()
                                .queue_action(AppAction::LoadShowcaseMesh(path));
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                }
                #[cfg(target_arch = "wasm32")]
                {
                    if ui.button("Open Snapshot...").clicked() {
                        let app_state = app_state.clone();
                        wasm_bindgen_futures::spawn_local(async move {
                            if let Some(file) = rfd::AsyncFileDialog::new()
                                .add_filter("Grasp Snapshot", &[SNAPSHOT_EXTENSION])
                                .pick_file()
                                .await
                            {
                                let name = file.file_name();
                                let data = file.read().await;
                                app_state
                                    .lock()
                                    .queue_action(AppAction::LoadSnapshotBytes { name, data });
                            }
                        });
                        ui.close_menu();
                    }
                    if ui.button("Save Snapshot...").clicked() {
                        let app_state = app_state.clone();
                        wasm_bindgen_futures::spawn_local(async move {
                            let data = {
                                let state = app_state.lock();
                                match state.snapshot().to_bytes() {
                                    Ok(data) => data,
                                    Err(e) => {
                                        tracing::error!("Failed to serialize snapshot: {}", e);
                                        return;
                                    }
                                }
                            };
                            let filename = format!("scene.{}", SNAPSHOT_EXTENSION);

                            if let Some(file) = rfd::AsyncFileDialog::new()
                                .add_filter("Grasp Snapshot", &[SNAPSHOT_EXTENSION])
                                .set_file_name(&filename)
                                .save_file()
                                .await
                            {
                                if let Err(e) = file.write(&data).await {
                                    tracing::error!("Failed to save snapshot: {:?}", e);
                                } else {
                                    tracing::info!("Snapshot saved successfully");
                                }
                            }
                        });
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Load Mesh...").clicked() {
                        let app_state = app_state.clone();
                        wasm_bindgen_futures::spawn_local(async move {
                            if let Some(file) = rfd::AsyncFileDialog::new()
                                .add_filter("OBJ files", &["obj", "OBJ"])
                                .pick_file()
                                .await
                            {
                                let name = file.file_name();
                                let data = file.read().await;
                                app_state
                                    .lock()
                                    .queue_action(AppAction::LoadShowcaseMeshBytes { name, data });
                            }
                        });
                        ui.close_menu();
                    }
                }
            });

            ui.menu_button("Edit", |ui| {
                if ui.button("Reset Interactions").clicked() {
                    app_state.lock().queue_action(AppAction::ResetInteractions);
                    ui.close_menu();
                }
            });

            ui.menu_button("View", |ui| {
                if ui.button("Reset Layout").clicked() {
                    menu_action = Some(MenuAction::ResetLayout);
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Dark Theme").clicked() {
                    menu_action = Some(MenuAction::SetTheme(UiTheme::Dark));
                    ui.close_menu();
                }
                if ui.button("Light Theme").clicked() {
                    menu_action = Some(MenuAction::SetTheme(UiTheme::Light));
                    ui.close_menu();
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    menu_action = Some(MenuAction::ShowAbout);
                    ui.close_menu();
                }
            });
        });
    });

    menu_action
}

/// Actions triggered by the menu
pub enum MenuAction {
    ResetLayout,
    SetTheme(UiTheme),
    ShowAbout,
}
