use eframe::egui::{self, Align2, Color32, FontId, Rect, RichText, Sense, Stroke, Vec2};
use egui::{pos2, vec2};
use ma_blocks_grid::constants::*;
use ma_blocks_grid::paths::AppPaths;
use ma_blocks_grid::{
    Axis, Block, CardView, DimensionEdit, GridConfig, LayoutCommand, LayoutEngine,
    MeasurementProvider, ResizeDirection,
};
use std::collections::HashMap;
use uuid::Uuid;

const SAMPLE_TEXTS: [&str; 6] = [
    "Welcome! Drag the grip to reorder cards.",
    "Cards pack into columns by their measured height, so short cards slide into the gaps left by tall neighbours without changing their order.",
    "Pull any edge or corner handle to resize. Past 85% of the grid width a card snaps to full width.",
    "Double-click a card to return it to automatic sizing.",
    "Lock a card to hide its resize handles. It can still be dragged.",
    "The panel on the right edits exact dimensions, with an optional aspect-ratio lock, and the card's style.",
];

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = match AppPaths::from_project_dirs() {
        Some(paths) => {
            if let Err(err) = paths.ensure_dirs_exist() {
                log::warn!("Failed to create {}: {err}", paths.config.display());
            }
            GridConfig::load_or_default(&paths.grid_config_file())
        }
        None => {
            log::warn!("No home directory found, using default grid config");
            GridConfig::default()
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([INITIAL_WINDOW_WIDTH, INITIAL_WINDOW_HEIGHT]),
        ..Default::default()
    };

    eframe::run_native(
        "MaBlocks Grid",
        options,
        Box::new(move |cc| Ok(Box::new(GridEditorApp::new(cc, config)))),
    )
}

/// Card boxes as drawn in the previous frame, in grid-local coordinates.
#[derive(Default)]
struct FrameMeasurements {
    container_width: f32,
    rects: HashMap<Uuid, Rect>,
}

impl MeasurementProvider for FrameMeasurements {
    fn card_rect(&self, id: Uuid) -> Option<Rect> {
        self.rects.get(&id).copied()
    }

    fn container_width(&self) -> f32 {
        self.container_width
    }
}

/// Text fields of the admin panel, tied to the card they were filled from.
#[derive(Default)]
struct DimensionInputs {
    block_id: Option<Uuid>,
    width: String,
    height: String,
}

impl DimensionInputs {
    fn refresh(&mut self, block: Option<&Block>) {
        self.block_id = block.map(|b| b.id);
        self.width = block
            .and_then(|b| b.width)
            .map(|w| format!("{w:.0}"))
            .unwrap_or_default();
        self.height = block
            .and_then(|b| b.height)
            .map(|h| format!("{h:.0}"))
            .unwrap_or_default();
    }
}

struct GridEditorApp {
    engine: LayoutEngine,
    measurements: FrameMeasurements,
    inputs: DimensionInputs,
    hovered: Option<Uuid>,
    next_sample: usize,
}

impl GridEditorApp {
    fn new(cc: &eframe::CreationContext<'_>, config: GridConfig) -> Self {
        let blocks = SAMPLE_TEXTS.iter().map(|text| Block::new(*text)).collect();
        let mut engine = LayoutEngine::new(config, blocks);
        let ctx = cc.egui_ctx.clone();
        engine.set_wake(move || ctx.request_repaint());

        Self {
            engine,
            measurements: FrameMeasurements::default(),
            inputs: DimensionInputs::default(),
            hovered: None,
            next_sample: 0,
        }
    }

    fn add_card(&mut self) {
        let text = SAMPLE_TEXTS[self.next_sample % SAMPLE_TEXTS.len()];
        self.next_sample += 1;
        let block = Block::new(format!("Card {}: {text}", self.engine.blocks().len() + 1));
        let id = block.id;
        if self.engine.push_block(block) {
            log::info!("Added card {id}");
        }
    }

    fn delete_selected(&mut self) {
        if let Some(id) = self.engine.selected() {
            if self.engine.remove_block(id).is_some() {
                self.measurements.rects.remove(&id);
                log::info!("Deleted card {id}");
            }
        }
    }

    fn apply_all(&mut self, commands: Vec<LayoutCommand>) {
        for command in commands {
            self.engine.apply(command, &self.measurements);
        }
    }

    /// A gesture whose widget vanished mid-drag (card deleted, handles hidden) never
    /// sees its drag stop; end it once the pointer is released.
    fn release_orphaned_gestures(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.pointer.any_down()) {
            return;
        }
        let mut commands = Vec::new();
        if self.engine.state().resize().is_resizing() {
            commands.push(LayoutCommand::ResizeEnd);
        }
        if self.engine.state().drag().is_dragging() {
            commands.push(LayoutCommand::DragEnd);
        }
        self.apply_all(commands);
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        let mut commands = Vec::new();
        ui.horizontal(|ui| {
            ui.add_space(TOOLBAR_START_SPACING);
            if toolbar_button(ui, "➕", "Add Card") {
                self.add_card();
            }

            let selected = self.engine.selected();
            ui.add_enabled_ui(selected.is_some(), |ui| {
                if toolbar_button(ui, "🗑", "Delete Selected") {
                    self.delete_selected();
                }
                if let Some(id) = selected {
                    if toolbar_button(ui, "🔒", "Toggle Resize Lock") {
                        commands.push(LayoutCommand::ToggleLock(id));
                    }
                    if toolbar_button(ui, "🔄", "Reset To Auto Size") {
                        commands.push(LayoutCommand::Reset(id));
                    }
                }
            });

            ui.separator();
            let mut config = self.engine.config().clone();
            ui.checkbox(&mut config.show_handles, "Handles");
            ui.checkbox(&mut config.enable_drag, "Drag");
            self.engine.set_config(config);

            ui.separator();
            let template = self.engine.template();
            ui.label(
                RichText::new(format!(
                    "{} column(s) · {:.0}px",
                    template.columns, template.column_width
                ))
                .color(Color32::GRAY),
            );
        });
        self.apply_all(commands);
    }

    fn admin_panel(&mut self, ui: &mut egui::Ui) {
        let selected = self.engine.selected();
        if self.inputs.block_id != selected {
            self.inputs.refresh(selected.and_then(|id| self.engine.block(id)));
        }
        let Some(block) = selected.and_then(|id| self.engine.block(id)).cloned() else {
            ui.label(RichText::new("Select a card to edit it.").color(Color32::GRAY));
            return;
        };
        let id = block.id;
        let mut commands = Vec::new();

        ui.heading("Dimensions");
        for (axis, label) in [(Axis::Width, "Width"), (Axis::Height, "Height")] {
            ui.horizontal(|ui| {
                ui.label(label);
                let text = match axis {
                    Axis::Width => &mut self.inputs.width,
                    Axis::Height => &mut self.inputs.height,
                };
                let response = ui.add(egui::TextEdit::singleline(&mut *text).desired_width(80.0));
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    match DimensionEdit::parse(text) {
                        Ok(edit) => commands.push(LayoutCommand::EditDimension {
                            block_id: id,
                            axis,
                            edit,
                        }),
                        Err(err) => log::warn!("Ignoring {label} input: {err}"),
                    }
                }
                if ui.small_button("✖").on_hover_text("Clear").clicked() {
                    commands.push(LayoutCommand::EditDimension {
                        block_id: id,
                        axis,
                        edit: DimensionEdit::Clear,
                    });
                }
            });
        }

        let mut aspect_locked = block.aspect.is_locked();
        if ui.checkbox(&mut aspect_locked, "Lock aspect ratio").changed() {
            commands.push(LayoutCommand::ToggleAspectLock(id));
        }
        let mut resize_locked = block.is_resize_locked;
        if ui.checkbox(&mut resize_locked, "Lock resize").changed() {
            commands.push(LayoutCommand::ToggleLock(id));
        }
        ui.label(
            RichText::new(if block.is_full_width {
                "Full width"
            } else if block.is_manually_resized {
                "Manual size"
            } else {
                "Auto size"
            })
            .color(Color32::GRAY),
        );

        ui.separator();
        ui.heading("Style");
        if let Some(style) = self.engine.style_mut(id) {
            ui.add(egui::Slider::new(&mut style.opacity, 0.1..=1.0).text("Opacity"));
            ui.add(egui::Slider::new(&mut style.border_width, 0.0..=8.0).text("Border"));
            ui.add(egui::Slider::new(&mut style.corner_radius, 0.0..=24.0).text("Corners"));
            ui.add(egui::Slider::new(&mut style.elevation, 0.0..=12.0).text("Elevation"));
        }

        let edited = !commands.is_empty();
        self.apply_all(commands);
        if edited {
            self.inputs.refresh(self.engine.block(id));
        }
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let container_width = (ui.available_width() - CANVAS_PADDING * 2.0).max(1.0);
        self.measurements.container_width = container_width;
        self.engine.set_container_width(container_width);

        let template = *self.engine.template();
        let content_height = ma_blocks_grid::grid::content_height(self.engine.placements(), &template);
        let canvas_size = vec2(
            container_width + CANVAS_PADDING * 2.0,
            (content_height + CANVAS_PADDING * 2.0).max(ui.available_height()),
        );
        let (canvas_rect, _) = ui.allocate_exact_size(canvas_size, Sense::hover());
        ui.painter().rect_filled(canvas_rect, 0.0, COLOR_CANVAS_BG);
        let origin = canvas_rect.min + Vec2::splat(CANVAS_PADDING);

        let cards = self.engine.cards();
        let pointer = ui.input(|i| i.pointer.interact_pos());
        let mut commands = Vec::new();
        let mut drawn: Vec<(CardView, Rect)> = Vec::with_capacity(cards.len());

        // Lay out every card first so hit-testing sees this frame's rectangles
        for view in cards {
            let Some(placement) = view.placement else {
                ui.ctx().request_repaint();
                continue;
            };
            let Some(block) = self.engine.block(view.id) else {
                continue;
            };
            let cell = placement.rect(&template).translate(origin.to_vec2());
            let width = view.width.unwrap_or(cell.width()).min(container_width);
            let galley = ui.painter().layout(
                block.content.clone(),
                FontId::proportional(CARD_FONT_SIZE),
                Color32::WHITE,
                (width - CARD_PADDING * 2.0).max(1.0),
            );
            let height = view
                .height
                .unwrap_or(galley.size().y + CARD_PADDING * 2.0);
            let card_rect = Rect::from_min_size(cell.min + view.resize_offset, vec2(width, height));

            let local = card_rect.translate(-origin.to_vec2());
            self.measurements.rects.insert(view.id, local);
            self.engine.notify_size(view.id, local.size());
            drawn.push((view, card_rect));
        }

        self.hovered = pointer.and_then(|p| {
            drawn
                .iter()
                .find(|(_, rect)| rect.contains(p))
                .map(|(view, _)| view.id)
        });

        for (view, card_rect) in &drawn {
            self.card_interactions(ui, view, *card_rect, &drawn, &mut commands);
        }

        // Dragged card last so it sits on top
        let (dragged, resting): (Vec<_>, Vec<_>) =
            drawn.iter().partition(|(view, _)| view.classes.dragging);
        for (view, card_rect) in resting.into_iter().chain(dragged) {
            self.paint_card(ui, view, *card_rect);
        }

        self.apply_all(commands);
    }

    fn card_interactions(
        &self,
        ui: &mut egui::Ui,
        view: &CardView,
        card_rect: Rect,
        drawn: &[(CardView, Rect)],
        commands: &mut Vec<LayoutCommand>,
    ) {
        let card_id = ui.id().with(view.id);

        let body = ui.interact(card_rect, card_id, Sense::click());
        if body.double_clicked() {
            commands.push(LayoutCommand::Reset(view.id));
        } else if body.clicked() {
            commands.push(LayoutCommand::Select(view.id));
        }

        if view.show_drag_grip {
            let grip = ui
                .interact(grip_rect(card_rect), card_id.with("grip"), Sense::drag())
                .on_hover_cursor(egui::CursorIcon::Grab);
            if grip.drag_started() {
                commands.push(LayoutCommand::DragStart(view.id));
            }
            if grip.dragged() {
                let under = ui.input(|i| i.pointer.interact_pos()).and_then(|p| {
                    drawn
                        .iter()
                        .find(|(other, rect)| other.id != view.id && rect.contains(p))
                        .map(|(other, _)| other.id)
                });
                let current = self.engine.state().drag().drag_over();
                if under != current {
                    if let Some(previous) = current {
                        commands.push(LayoutCommand::DragLeave(previous));
                    }
                    if let Some(target) = under {
                        commands.push(LayoutCommand::DragEnter(target));
                    }
                }
            }
            if grip.drag_stopped() {
                if let Some(target) = self.engine.state().drag().drag_over() {
                    commands.push(LayoutCommand::Drop(target));
                }
                commands.push(LayoutCommand::DragEnd);
            }
        }

        let resizing = self.engine.state().resize().active().map(|g| g.block_id);
        let engaged = view.classes.selected
            || self.hovered == Some(view.id)
            || resizing == Some(view.id);
        if !view.show_resize_handles || !engaged {
            return;
        }
        for direction in ResizeDirection::ALL {
            let handle = ui
                .interact(
                    direction.handle_rect(card_rect, HANDLE_SIZE),
                    card_id.with(direction),
                    Sense::drag(),
                )
                .on_hover_cursor(direction.cursor());
            if handle.drag_started() {
                if let Some(origin) = ui.input(|i| i.pointer.press_origin()) {
                    commands.push(LayoutCommand::ResizeStart {
                        block_id: view.id,
                        direction,
                        pointer: origin,
                    });
                }
            }
            if handle.dragged() {
                if let Some(pointer) = ui.input(|i| i.pointer.interact_pos()) {
                    commands.push(LayoutCommand::ResizeMove { pointer });
                }
            }
            if handle.drag_stopped() {
                commands.push(LayoutCommand::ResizeEnd);
            }
        }
    }

    fn paint_card(&self, ui: &egui::Ui, view: &CardView, card_rect: Rect) {
        let Some(block) = self.engine.block(view.id) else {
            return;
        };
        let painter = ui.painter();
        let style = &block.style;
        let rounding = egui::Rounding::same(style.corner_radius);
        let opacity = if view.classes.dragging {
            style.opacity * DRAGGING_OPACITY
        } else {
            style.opacity
        };

        if style.elevation > 0.0 {
            painter.rect_filled(
                card_rect.translate(Vec2::splat(style.elevation * 0.5)),
                rounding,
                Color32::from_black_alpha(90).gamma_multiply(opacity),
            );
        }
        painter.rect_filled(card_rect, rounding, style.background_color().gamma_multiply(opacity));
        if style.border_width > 0.0 {
            painter.rect_stroke(
                card_rect,
                rounding,
                Stroke::new(style.border_width, style.border_color().gamma_multiply(opacity)),
            );
        }

        let galley = painter.layout(
            block.content.clone(),
            FontId::proportional(CARD_FONT_SIZE),
            Color32::WHITE.gamma_multiply(opacity),
            (card_rect.width() - CARD_PADDING * 2.0).max(1.0),
        );
        let text_rect = card_rect.shrink(CARD_PADDING);
        painter.with_clip_rect(text_rect.expand(1.0)).galley(
            text_rect.min,
            galley,
            Color32::WHITE,
        );

        let marker = if view.classes.drag_over {
            Some(COLOR_DRAG_OVER)
        } else if view.classes.selected {
            Some(COLOR_SELECTED)
        } else if view.classes.full_width {
            Some(COLOR_FULL_WIDTH)
        } else {
            None
        };
        if let Some(color) = marker {
            painter.rect_stroke(card_rect, rounding, Stroke::new(MARKER_STROKE_WIDTH, color));
        }

        if view.classes.resize_locked {
            painter.text(
                card_rect.right_top() + vec2(-CARD_PADDING, CARD_PADDING * 0.5),
                Align2::RIGHT_TOP,
                "🔒",
                FontId::proportional(CARD_FONT_SIZE),
                COLOR_LOCK_BADGE,
            );
        } else if view.classes.manually_resized {
            painter.circle_filled(
                card_rect.right_top() + vec2(-CARD_PADDING, CARD_PADDING),
                3.0,
                COLOR_MANUAL_BADGE,
            );
        }

        if view.show_drag_grip {
            let grip = grip_rect(card_rect);
            for row in 0..3 {
                for column in 0..2 {
                    let dot = pos2(
                        grip.min.x + 6.0 + column as f32 * 6.0,
                        grip.min.y + 4.0 + row as f32 * 5.0,
                    );
                    painter.circle_filled(dot, 1.5, COLOR_GRIP);
                }
            }
        }

        let resizing = self.engine.state().resize().active().map(|g| g.block_id);
        let engaged = view.classes.selected
            || self.hovered == Some(view.id)
            || resizing == Some(view.id);
        if view.show_resize_handles && engaged {
            for direction in ResizeDirection::ALL {
                let handle = direction.handle_rect(card_rect, HANDLE_SIZE);
                painter.rect_filled(handle, egui::Rounding::same(2.0), COLOR_HANDLE);
            }
        }
    }
}

fn grip_rect(card_rect: Rect) -> Rect {
    Rect::from_min_size(card_rect.min, Vec2::splat(GRIP_SIZE))
}

fn toolbar_button(ui: &mut egui::Ui, icon: &str, hover: &str) -> bool {
    ui.add(
        egui::Button::new(RichText::new(icon).size(TOOLBAR_ICON_SIZE))
            .min_size(Vec2::splat(TOOLBAR_BUTTON_SIZE))
            .frame(false),
    )
    .on_hover_text(hover)
    .clicked()
}

impl eframe::App for GridEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Notifications from the previous frame coalesce into this single pass
        self.engine.tick(&self.measurements);

        egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::default()
                    .fill(COLOR_TOOLBAR_BG)
                    .inner_margin(0.0)
                    .outer_margin(0.0),
            )
            .show(ctx, |ui| self.toolbar(ui));

        egui::SidePanel::right("admin")
            .exact_width(ADMIN_PANEL_WIDTH)
            .show(ctx, |ui| self.admin_panel(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(COLOR_CANVAS_BG))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("grid_canvas")
                    .auto_shrink([false, false])
                    .show(ui, |ui| self.canvas(ui));
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Delete)) && !ctx.wants_keyboard_input() {
            self.delete_selected();
        }
        self.release_orphaned_gestures(ctx);
    }
}
