//! Contrast preview widget
//!
//! In the browser it wires the page's sliders and radio group to the WCAG
//! math in `spike_jumper::contrast`. The native build prints a report for two
//! hex colors.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod widget {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, HtmlInputElement};

    use spike_jumper::contrast::{ContrastInputs, ContrastReport, Rgb, VisionMode};
    use spike_jumper::platform::dom;

    /// Slider ids, background then text, r/g/b
    const CHANNEL_SLIDERS: [&str; 6] = ["bg-r", "bg-g", "bg-b", "text-r", "text-g", "text-b"];

    fn set_style(document: &Document, id: &str, property: &str, value: &str) {
        let Some(el) = document
            .get_element_by_id(id)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        else {
            log::warn!("missing #{}", id);
            return;
        };
        if el.style().set_property(property, value).is_err() {
            log::warn!("could not set {} on #{}", property, id);
        }
    }

    fn style_slider(document: &Document, id: &str, color: Rgb) {
        set_style(document, id, "--thumb-color", &color.css());
        set_style(
            document,
            id,
            "background",
            &format!("linear-gradient(90deg, #000, {})", color.css()),
        );
    }

    fn slider_value(document: &Document, id: &str) -> Option<u32> {
        let input: HtmlInputElement = document.get_element_by_id(id)?.dyn_into().ok()?;
        input.value().parse().ok()
    }

    /// Push the current inputs to every output element
    fn update_all(document: &Document, inputs: &ContrastInputs) {
        let (bg, tx) = (inputs.background, inputs.text);
        for (prefix, c) in [("bg", bg), ("text", tx)] {
            dom::set_text(document, &format!("{prefix}-r-val"), &c.r.to_string());
            dom::set_text(document, &format!("{prefix}-g-val"), &c.g.to_string());
            dom::set_text(document, &format!("{prefix}-b-val"), &c.b.to_string());
            set_style(document, &format!("{prefix}-swatch"), "background-color", &c.css());
            dom::set_text(document, &format!("{prefix}-hex"), &c.to_hex());
            style_slider(document, &format!("{prefix}-r"), Rgb::new(c.r, 0, 0));
            style_slider(document, &format!("{prefix}-g"), Rgb::new(0, c.g, 0));
            style_slider(document, &format!("{prefix}-b"), Rgb::new(0, 0, c.b));
        }
        dom::set_text(document, "text-size-val", &format!("{}px", inputs.text_size));
        set_style(document, "text-size", "--thumb-color", "#00FFFF");
        set_style(
            document,
            "text-size",
            "background",
            "linear-gradient(90deg, #003333, #00FFFF)",
        );

        let report = ContrastReport::new(inputs);
        set_style(
            document,
            "preview-area",
            "background-color",
            &report.preview_background.css(),
        );
        set_style(document, "preview-area", "color", &report.preview_text.css());
        set_style(
            document,
            "preview-area",
            "font-size",
            &format!("{}px", inputs.text_size),
        );

        let class = report.level.css_class();
        dom::set_text(document, "contrast-ratio", &report.ratio_label());
        dom::set_class(
            document,
            "contrast-ratio",
            &format!("metric-value contrast-value {class}"),
        );
        dom::set_text(document, "contrast-badge", report.level.badge());
        dom::set_class(document, "contrast-badge", &format!("contrast-badge {class}"));
        dom::set_text(document, "wcag-indicator", report.level.message());
        dom::set_class(document, "wcag-indicator", &format!("wcag-indicator {class}"));
        dom::set_text(
            document,
            "bg-luminance",
            &ContrastReport::luminance_label(report.background_luminance),
        );
        dom::set_text(
            document,
            "text-luminance",
            &ContrastReport::luminance_label(report.text_luminance),
        );
    }

    /// Apply one slider's new value
    fn apply_slider(inputs: &mut ContrastInputs, id: &str, value: u32) {
        let channel = value.min(255) as u8;
        match id {
            "bg-r" => inputs.background.r = channel,
            "bg-g" => inputs.background.g = channel,
            "bg-b" => inputs.background.b = channel,
            "text-r" => inputs.text.r = channel,
            "text-g" => inputs.text.g = channel,
            "text-b" => inputs.text.b = channel,
            "text-size" => inputs.text_size = value,
            _ => {}
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        // Already initialised on a hot reload
        let _ = console_log::init_with_level(log::Level::Info);

        let document = dom::document()?;
        let inputs = Rc::new(RefCell::new(ContrastInputs::default()));

        for id in CHANNEL_SLIDERS.into_iter().chain(["text-size"]) {
            let slider = dom::require(&document, id)?;
            let doc = document.clone();
            let inputs = inputs.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(value) = slider_value(&doc, id) else {
                    return;
                };
                let mut inputs = inputs.borrow_mut();
                apply_slider(&mut inputs, id, value);
                update_all(&doc, &inputs);
            });
            slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        let radios = document.query_selector_all("input[name=\"vision\"]")?;
        for i in 0..radios.length() {
            let Some(radio) = radios
                .item(i)
                .and_then(|n| n.dyn_into::<HtmlInputElement>().ok())
            else {
                continue;
            };
            let doc = document.clone();
            let inputs = inputs.clone();
            let radio_clone = radio.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut inputs = inputs.borrow_mut();
                inputs.vision = VisionMode::parse(&radio_clone.value());
                update_all(&doc, &inputs);
            });
            radio.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        update_all(&document, &inputs.borrow());
        log::info!("Contrast preview ready");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    widget::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use spike_jumper::contrast::{ContrastInputs, ContrastReport, Rgb, VisionMode};

    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let defaults = ContrastInputs::default();
    let parse = |idx: usize, fallback: Rgb| match args.get(idx) {
        Some(raw) => Rgb::from_hex(raw).unwrap_or_else(|| {
            log::warn!("Ignoring bad color {:?}, using {}", raw, fallback.to_hex());
            fallback
        }),
        None => fallback,
    };
    let inputs = ContrastInputs {
        background: parse(0, defaults.background),
        text: parse(1, defaults.text),
        vision: args
            .get(2)
            .map(|v| VisionMode::parse(v))
            .unwrap_or_default(),
        ..defaults
    };

    let report = ContrastReport::new(&inputs);
    println!(
        "background  {}  luminance {}",
        inputs.background.to_hex(),
        ContrastReport::luminance_label(report.background_luminance)
    );
    println!(
        "text        {}  luminance {}",
        inputs.text.to_hex(),
        ContrastReport::luminance_label(report.text_luminance)
    );
    println!(
        "contrast    {}  [{}] {}",
        report.ratio_label(),
        report.level.badge(),
        report.level.message()
    );
    if inputs.vision != VisionMode::Normal {
        println!(
            "preview     {:?}: {} on {}",
            inputs.vision,
            report.preview_text.to_hex(),
            report.preview_background.to_hex()
        );
    }
}
