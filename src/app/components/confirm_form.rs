//! In-flow confirmation form collecting one text value.

use dioxus::prelude::*;

use crate::views::Confirmation;

#[derive(Props, Clone, PartialEq)]
pub struct ConfirmFormProps {
    #[props(into)]
    pub title: String,
    #[props(into)]
    pub label: String,
    /// Prefilled value
    #[props(default, into)]
    pub initial: String,
    #[props(default = "Confirm".to_string(), into)]
    pub confirm_label: String,
    pub on_answer: EventHandler<Confirmation<String>>,
}

#[component]
pub fn ConfirmForm(props: ConfirmFormProps) -> Element {
    let initial = props.initial.clone();
    let mut value = use_signal(move || initial);
    let on_answer = props.on_answer;

    rsx! {
        form {
            class: "card border border-gray-200 my-4 space-y-3",
            onsubmit: move |e| {
                e.prevent_default();
                on_answer.call(Confirmation::Confirmed(value()));
            },
            h3 { class: "font-semibold", "{props.title}" }
            label { class: "block text-sm text-gray-600",
                "{props.label}"
                input {
                    class: "mt-1 w-full rounded-md border border-gray-300 px-3 py-2",
                    r#type: "text",
                    value: "{value}",
                    oninput: move |e| value.set(e.value()),
                }
            }
            div { class: "flex gap-2",
                button {
                    class: "px-4 py-2 rounded-md bg-green-600 text-white font-semibold hover:bg-green-500",
                    r#type: "submit",
                    "{props.confirm_label}"
                }
                button {
                    class: "px-4 py-2 rounded-md border border-gray-300 hover:bg-gray-50",
                    r#type: "button",
                    onclick: move |_| on_answer.call(Confirmation::Cancelled),
                    "Cancel"
                }
            }
        }
    }
}
