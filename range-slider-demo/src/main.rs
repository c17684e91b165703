use anyhow::{Context, Result};
use clap::Parser;
use range_slider_binding::{ElementState, RangeSliderAdapter, RangeSliderElement};
use range_slider_core::{
    LabelFormat, RangeSliderArgs, SliderEvent, SliderLayout, geometry::Size,
};
use tracing::info;

mod output;
mod script;

use script::Player;

#[derive(Parser)]
#[command(name = "range-slider-demo")]
#[command(version, about = "Drive a range slider from a scripted pointer sequence", long_about = None)]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// Pointer script, e.g. "down:16 move:120 up:120"; `down@1:x` addresses pointer 1
    #[arg(default_value = "")]
    script: String,
    /// Absolute lower bound
    #[arg(long, default_value_t = 0.0)]
    min: f32,
    /// Absolute upper bound
    #[arg(long, default_value_t = 100.0)]
    max: f32,
    /// Initial lower value (defaults to the lower bound)
    #[arg(long)]
    lower: Option<f32>,
    /// Initial upper value (defaults to the upper bound)
    #[arg(long)]
    upper: Option<f32>,
    /// Step granularity, 0 for continuous values
    #[arg(long, default_value_t = 0.0)]
    step: f32,
    /// Snap to steps while dragging instead of only on release
    #[arg(long)]
    continuous: bool,
    /// Minimum distance between both values
    #[arg(long, default_value_t = 0.0)]
    minimum_range: f32,
    /// Label format ("F0", "F2", ...)
    #[arg(long, default_value = "F0")]
    format: String,
    /// Hide the labels above the thumbs
    #[arg(long)]
    hide_text: bool,
    /// Widget width in pixels
    #[arg(long, default_value_t = 360.0)]
    width: f32,
    /// Distance a pointer travels before a press becomes a drag
    #[arg(long, default_value_t = 8.0)]
    touch_slop: f32,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    cli.format
        .parse::<LabelFormat>()
        .with_context(|| format!("invalid --format `{}`", cli.format))?;
    let steps = script::parse(&cli.script)?;

    let element = RangeSliderElement::with_state(ElementState {
        minimum_value: cli.min,
        maximum_value: cli.max,
        lower_value: cli.lower.unwrap_or(cli.min),
        upper_value: cli.upper.unwrap_or(cli.max),
        step_value: cli.step,
        step_value_continuously: cli.continuous,
        minimum_range: cli.minimum_range,
        show_text_above_thumbs: !cli.hide_text,
        text_format: cli.format.clone(),
        ..ElementState::default()
    });
    element.add_event_handler(|event| output::event(describe(event)));

    let args = RangeSliderArgs::default().touch_slop(cli.touch_slop);
    let mut adapter =
        RangeSliderAdapter::attach(element.clone(), args).context("failed to create slider")?;
    let slider = adapter.slider_mut();
    slider.set_bounds(Size::new(cli.width, 0.0));
    let height = slider.preferred_height();
    slider.set_bounds(Size::new(cli.width, height));

    output::status(
        "Created",
        format!("slider {}x{} over [{}, {}]", cli.width, height, cli.min, cli.max),
    );
    report_layout(&adapter.slider().layout());

    info!(steps = steps.len(), "running pointer script");
    let mut player = Player::default();
    for step in steps {
        let claimed = player.apply(adapter.slider_mut(), step);
        let outcome = if claimed { "claimed" } else { "ignored" };
        output::status("Pointer", format!("{step} ({outcome})"));
    }

    report_layout(&adapter.slider().layout());
    output::status(
        "Selected",
        format!("{} .. {}", element.lower_value(), element.upper_value()),
    );
    Ok(())
}

fn describe(event: SliderEvent) -> String {
    match event {
        SliderEvent::LowerValueChanged(value) => format!("lower value changed to {value}"),
        SliderEvent::UpperValueChanged(value) => format!("upper value changed to {value}"),
        SliderEvent::DragStarted => "drag started".to_string(),
        SliderEvent::DragCompleted => "drag completed".to_string(),
    }
}

fn report_layout(layout: &SliderLayout) {
    output::status(
        "Layout",
        format!(
            "track {:.1}..{:.1}, active {:.1}..{:.1}{}",
            layout.track.left,
            layout.track.right,
            layout.active_range.left,
            layout.active_range.right,
            if layout.highlight_active { " (highlighted)" } else { "" },
        ),
    );
    for (name, thumb) in [("lower", &layout.lower_thumb), ("upper", &layout.upper_thumb)] {
        if thumb.visible {
            output::step(format!("{name} thumb at x = {:.1}", thumb.center_x));
        }
    }
    for (name, label) in [("lower", &layout.lower_label), ("upper", &layout.upper_label)] {
        if let Some(label) = label {
            output::step(format!(
                "{name} label \"{}\" at {:.1}..{:.1}",
                label.text, label.rect.left, label.rect.right
            ));
        }
    }
}

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new("error,range_slider_core=info") {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .try_init();
}
