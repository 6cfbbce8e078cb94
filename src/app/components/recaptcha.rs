//! Google reCAPTCHA v2 checkbox for the signup form.
//!
//! The widget is rendered explicitly once the script calls back, and its
//! token lives in a signal so the form can gate its submit button.

use dioxus::prelude::*;

use crate::auth::BotCheck;

const CONTAINER_ID: &str = "survex-recaptcha";
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
const SCRIPT_ID: &str = "google-recaptcha-script";
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
const ONLOAD_CALLBACK: &str = "onSurvexRecaptchaReady";

/// Token and widget id of a mounted checkbox.
#[derive(Clone, Copy, PartialEq)]
pub struct RecaptchaHandle {
    token: Signal<String>,
    widget: Signal<Option<f64>>,
}

impl RecaptchaHandle {
    pub fn has_token(&self) -> bool {
        !self.token.read().is_empty()
    }
}

impl BotCheck for RecaptchaHandle {
    fn token(&self) -> String {
        self.token.peek().clone()
    }

    fn reset(&self) {
        let mut token = self.token;
        token.set(String::new());
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(id) = *self.widget.peek() {
                interop::reset(id);
            }
        }
    }
}

pub fn use_recaptcha() -> RecaptchaHandle {
    RecaptchaHandle {
        token: use_signal(String::new),
        widget: use_signal(|| None),
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct RecaptchaProps {
    pub site_key: String,
    pub handle: RecaptchaHandle,
}

#[component]
pub fn Recaptcha(props: RecaptchaProps) -> Element {
    let site_key = props.site_key.clone();
    let handle = props.handle;

    // Effects only run in the browser.
    use_effect(move || {
        if handle.widget.peek().is_some() {
            return;
        }
        #[cfg(target_arch = "wasm32")]
        {
            if let Err(e) = interop::mount(&site_key, handle) {
                tracing::warn!("reCAPTCHA failed to load: {:?}", e);
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = &site_key;
    });

    rsx! {
        div { id: CONTAINER_ID, class: "my-2" }
    }
}

#[cfg(target_arch = "wasm32")]
mod interop {
    use js_sys::{Function, Object, Reflect};
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};

    use super::{RecaptchaHandle, CONTAINER_ID, ONLOAD_CALLBACK, SCRIPT_ID};
    use dioxus::prelude::*;

    fn grecaptcha() -> Result<JsValue, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        Reflect::get(&window, &"grecaptcha".into())
    }

    fn method(target: &JsValue, name: &str) -> Result<Function, JsValue> {
        Reflect::get(target, &name.into())?.dyn_into::<Function>()
    }

    /// Render now if the script is ready, otherwise load it and render on callback.
    pub fn mount(site_key: &str, handle: RecaptchaHandle) -> Result<(), JsValue> {
        if let Ok(api) = grecaptcha() {
            if method(&api, "render").is_ok() {
                return render(&api, site_key, handle);
            }
        }

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let key = site_key.to_string();
        let onload = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            if let Err(e) = grecaptcha().and_then(|api| render(&api, &key, handle)) {
                tracing::warn!("reCAPTCHA render failed: {:?}", e);
            }
        }));
        Reflect::set(&window, &ONLOAD_CALLBACK.into(), onload.as_ref().unchecked_ref())?;
        onload.forget();

        let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
        if document.get_element_by_id(SCRIPT_ID).is_none() {
            let script = document.create_element("script")?;
            script.set_id(SCRIPT_ID);
            script.set_attribute(
                "src",
                &format!(
                    "https://www.google.com/recaptcha/api.js?onload={}&render=explicit",
                    ONLOAD_CALLBACK
                ),
            )?;
            script.set_attribute("async", "")?;
            script.set_attribute("defer", "")?;
            let head = document.head().ok_or_else(|| JsValue::from_str("no head"))?;
            head.append_child(&script)?;
        }
        Ok(())
    }

    fn render(api: &JsValue, site_key: &str, handle: RecaptchaHandle) -> Result<(), JsValue> {
        let params = Object::new();
        Reflect::set(&params, &"sitekey".into(), &site_key.into())?;

        let mut token = handle.token;
        let on_token = Closure::<dyn FnMut(JsValue)>::wrap(Box::new(move |value: JsValue| {
            token.set(value.as_string().unwrap_or_default());
        }));
        Reflect::set(&params, &"callback".into(), on_token.as_ref().unchecked_ref())?;
        on_token.forget();

        for event in ["expired-callback", "error-callback"] {
            let mut token = handle.token;
            let on_clear = Closure::<dyn FnMut()>::wrap(Box::new(move || token.set(String::new())));
            Reflect::set(&params, &event.into(), on_clear.as_ref().unchecked_ref())?;
            on_clear.forget();
        }

        let id = method(api, "render")?.call2(api, &CONTAINER_ID.into(), &params)?;
        let mut widget = handle.widget;
        widget.set(id.as_f64());
        Ok(())
    }

    pub fn reset(id: f64) {
        let result = grecaptcha().and_then(|api| method(&api, "reset")?.call1(&api, &id.into()));
        if let Err(e) = result {
            tracing::debug!("reCAPTCHA reset failed: {:?}", e);
        }
    }
}
