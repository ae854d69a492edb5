use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::console;

use relivis::controls::{spec_for, ControlKey, ControlState};
use relivis::prelude::TrialChart;

use crate::float_fmt::fmt_f64_fixed;
use crate::ui_model::{
    apply_slider_input, readout_id, readout_text, slider_id, slider_value, ToggleGroup, Visibility,
};

mod canvas;

pub fn start() {
    console::log_1(&JsValue::from_str("relivis: mounting chart"));
    mount_to_body(|| view! { <App /> });
}

#[component]
fn App() -> impl IntoView {
    // Initial conditions are drawn once per page load.
    let chart = StoredValue::new(TrialChart::with_seed(js_sys::Date::now() as u64));
    let layout = chart.with_value(|c| *c.layout());

    let controls = RwSignal::new(ControlState::default());
    let status = RwSignal::new(String::new());
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    Effect::new(move |_| {
        let state = controls.get();
        let Some(canvas) = canvas_ref.get() else {
            return;
        };

        let mut frame = None;
        chart.update_value(|c| frame = Some(c.update(&state)));
        let drawn = match frame {
            Some(Ok(frame)) => canvas::draw_scene(&canvas, &frame.scene),
            Some(Err(e)) => Err(e.to_string()),
            None => Err("chart state unavailable".to_string()),
        };

        match drawn {
            Ok(()) => status.set(String::new()),
            Err(e) => {
                console::error_1(&JsValue::from_str(&e));
                status.set(e);
            }
        }
    });

    view! {
        <main>
            <div class="controls">
                {ControlKey::all()
                    .iter()
                    .copied()
                    .map(|key| view! { <Slider key=key controls=controls /> })
                    .collect_view()}
            </div>
            <div class="toggles">
                {ToggleGroup::all()
                    .iter()
                    .copied()
                    .map(|group| view! { <VisibilityRadios group=group controls=controls /> })
                    .collect_view()}
            </div>
            <canvas
                node_ref=canvas_ref
                width=fmt_f64_fixed(layout.width, 0)
                height=fmt_f64_fixed(layout.height, 0)
            ></canvas>
            <p class="status">{move || status.get()}</p>
        </main>
    }
}

#[component]
fn Slider(key: ControlKey, controls: RwSignal<ControlState>) -> impl IntoView {
    let spec = spec_for(key);
    let id = slider_id(key);

    let min = readout_text(&spec, spec.min);
    let max = readout_text(&spec, spec.max);
    let step = fmt_f64_fixed(spec.step, spec.decimals());
    let readout = {
        let spec = spec.clone();
        move || controls.with(|c| readout_text(&spec, c.get(key)))
    };

    view! {
        <div class="control" title=spec.description>
            <label for=id.clone()>{spec.label}</label>
            <input
                id=id
                type="range"
                min=min
                max=max
                step=step
                prop:value=move || controls.with(|c| slider_value(c, key))
                on:input=move |ev| {
                    let raw = event_target_value(&ev);
                    let mut next = controls.get_untracked();
                    if apply_slider_input(&mut next, key, &raw) {
                        controls.set(next);
                    }
                }
            />
            <span id=readout_id(key) class="readout">{readout}</span>
        </div>
    }
}

#[component]
fn VisibilityRadios(group: ToggleGroup, controls: RwSignal<ControlState>) -> impl IntoView {
    view! {
        <fieldset>
            <legend>{group.label()}</legend>
            {Visibility::all()
                .iter()
                .copied()
                .map(|v| {
                    let id = format!("{}-{}", group.name(), v.value());
                    view! {
                        <label for=id.clone()>
                            <input
                                id=id
                                type="radio"
                                name=group.name()
                                value=v.value()
                                prop:checked=move || {
                                    controls.with(|c| group.is_shown(c) == v.is_shown())
                                }
                                on:change=move |ev| {
                                    let raw = event_target_value(&ev);
                                    let mut next = controls.get_untracked();
                                    if group.apply_input(&mut next, &raw) {
                                        controls.set(next);
                                    }
                                }
                            />
                            {v.label()}
                        </label>
                    }
                })
                .collect_view()}
        </fieldset>
    }
}
