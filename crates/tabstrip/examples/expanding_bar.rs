//! Drives a tab bar controller through a few frames and prints what it draws.
//!
//! Run with `RUST_LOG=debug cargo run --example expanding_bar` to see layout
//! decisions as they happen; `RUST_LOG=info` shows just the demo's own steps.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;
use tabstrip::prelude::*;
use tabstrip::widgets::DisplayEntry;
use tabstrip::{widget::LayoutResult, DrawCommand, TypeId};

struct Page {
    title: String,
    bounds: Rect,
}

impl Widget for Page {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(Size::new(320.0, 400.0))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rect(self.bounds, Color::WHITE);
        canvas.draw_text(&self.title, self.bounds.center(), &Default::default());
    }

    fn event(&mut self, _event: &Event) -> Option<Box<dyn Any + Send>> {
        None
    }
}

struct Printer;

impl TabBarControllerDelegate for Printer {
    fn should_select_page(&mut self, index: usize, page: &TabPage) -> bool {
        println!("asked to select {index} ({})", page.item.id());
        true
    }

    fn did_tap_more(&mut self, indices: &[usize]) {
        println!("more tapped, folded pages: {indices:?}");
    }
}

fn describe(canvas: &RecordingCanvas) {
    for command in canvas.commands() {
        match command {
            DrawCommand::Text { content, position, .. } => {
                println!("  text {content:?} at ({:.0}, {:.0})", position.x, position.y);
            }
            DrawCommand::PushOpacity { alpha } => println!("  opacity {alpha:.2}"),
            _ => {}
        }
    }
}

fn tap(controller: &mut TabBarController, slot: usize) {
    let Some(position) = controller.tab_bar().entry_frame(slot).map(|f| f.center()) else {
        log::warn!("slot {slot} is not displayed, nothing to tap");
        return;
    };
    log::info!("tapping slot {slot} at ({:.0}, {:.0})", position.x, position.y);
    for event in [
        Event::MouseDown {
            position,
            button: tabstrip::MouseButton::Left,
        },
        Event::MouseUp {
            position,
            button: tabstrip::MouseButton::Left,
        },
    ] {
        if let Some(message) = controller.event(&event) {
            if let Ok(message) = message.downcast::<ControllerMessage>() {
                println!("message: {message:?}");
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let icon = Arc::new(Image::solid(Color::rgb(0.2, 0.4, 0.9), Size::new(24.0, 24.0))?);
    let names = [
        "Inbox", "Starred", "Sent", "Drafts", "Archive", "Spam", "Trash", "Notes", "Tasks",
        "Calendar", "Contacts", "Files",
    ];
    let pages = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let mut item = TabItem::new(name.to_lowercase(), *name).image(Arc::clone(&icon));
            if i == 0 {
                item = item.badge("3");
            }
            TabPage::new(
                item,
                Page {
                    title: format!("{name} page"),
                    bounds: Rect::default(),
                },
            )
        })
        .collect();

    let style = TabBarStyle::from_yaml(
        "item_spacing: 6\nmax_rows: 2\nselected_tint: \"#3478f6\"\nanimation_duration_ms: 200\n",
    )?;
    log::info!("loaded style, cross-fade {:?}", style.animation_duration());
    let mut controller = TabBarController::new(pages)?.with_delegate(Printer);
    controller.set_tab_bar_style(style);
    controller.set_more_item(Some(
        TabItem::new("more", "More").image(Arc::clone(&icon)),
    ))?;

    for width in [320.0, 568.0, 1024.0] {
        log::info!("laying out at width {width}");
        controller.layout(Rect::new(0.0, 0.0, width, 480.0));
        let bar = controller.tab_bar();
        let more = bar.displayed_entries().contains(&DisplayEntry::More);
        println!(
            "width {width}: {} rows of {:.0}px, padding {:.0}, {} folded, more shown: {more}",
            bar.rows(),
            bar.row_height(),
            bar.padding(),
            bar.folded_items().len()
        );
    }

    controller.layout(Rect::new(0.0, 0.0, 320.0, 480.0));
    tap(&mut controller, 2);
    for frame in 0..3 {
        controller.advance(Duration::from_millis(80));
        let mut canvas = RecordingCanvas::new();
        controller.paint(&mut canvas);
        println!("frame {frame}:");
        describe(&canvas);
    }

    if let Some(slot) = controller.tab_bar().tab_layout().more_slot() {
        tap(&mut controller, slot);
    }
    Ok(())
}
