//! Login and signup pages.

use dioxus::prelude::*;

use crate::app::api::use_app;
use crate::app::components::{use_recaptcha, Layout, Recaptcha};
use crate::app::Route;
use crate::auth::{failure_message, BotCheck, LoginForm, NoBotCheck, RegistrationForm};

const INPUT_CLASS: &str = "mt-1 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-green-600 focus:outline-none";
const LABEL_CLASS: &str = "block text-sm font-medium text-gray-700";

#[derive(Props, Clone, PartialEq)]
struct FieldProps {
    id: &'static str,
    label: &'static str,
    #[props(default = "text")]
    kind: &'static str,
    #[props(default)]
    placeholder: &'static str,
    #[props(default = true)]
    required: bool,
    value: String,
    oninput: EventHandler<String>,
}

#[component]
fn Field(props: FieldProps) -> Element {
    let oninput = props.oninput;
    rsx! {
        div {
            label { class: LABEL_CLASS, r#for: props.id, "{props.label}" }
            input {
                class: INPUT_CLASS,
                id: props.id,
                name: props.id,
                r#type: props.kind,
                required: props.required,
                placeholder: props.placeholder,
                value: "{props.value}",
                oninput: move |e| oninput.call(e.value()),
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct AuthCardProps {
    title: &'static str,
    subtitle: &'static str,
    children: Element,
}

#[component]
fn AuthCard(props: AuthCardProps) -> Element {
    rsx! {
        div { class: "max-w-2xl mx-auto",
            Link { class: "mb-6 inline-block text-sm font-semibold text-green-700 hover:text-green-600", to: Route::Landing {}, "Back to Home" }
            section { class: "card",
                h1 { class: "text-3xl font-extrabold", "{props.title}" }
                p { class: "mt-2 mb-6 text-sm text-gray-500", "{props.subtitle}" }
                {props.children}
            }
        }
    }
}

fn submit_label(submitting: bool, label: &'static str) -> &'static str {
    if submitting {
        "Please wait..."
    } else {
        label
    }
}

/// Login page component.
#[component]
pub fn Login() -> Element {
    let app = use_app();
    let nav = navigator();
    let mut form = use_signal(LoginForm::default);
    let mut submitting = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let onsubmit = move |e: FormEvent| {
        e.prevent_default();
        if submitting() {
            return;
        }
        error.set(None);
        submitting.set(true);

        let flow = app.auth_flow();
        let form = form();
        spawn(async move {
            let result = flow.login(&form, &NoBotCheck).await;
            submitting.set(false);
            match result {
                Ok(_) => {
                    nav.push(Route::Dashboard {});
                }
                Err(e) => error.set(Some(failure_message(&e))),
            }
        });
    };

    rsx! {
        Layout { title: "Login", nav_active: "login", public: true,
            AuthCard { title: "Log In", subtitle: "Access your account and continue earning rewards.",
                form { class: "space-y-4", onsubmit,
                    Field {
                        id: "email", label: "Email", kind: "email", placeholder: "you@example.com",
                        value: form.read().email.clone(),
                        oninput: move |v| form.write().email = v,
                    }
                    Field {
                        id: "password", label: "Password", kind: "password", placeholder: "Minimum 8 characters",
                        value: form.read().password.clone(),
                        oninput: move |v| form.write().password = v,
                    }
                    if let Some(message) = error() {
                        p { class: "status-err text-sm", "{message}" }
                    }
                    button {
                        class: "w-full rounded-md bg-green-600 px-4 py-2 font-semibold text-white hover:bg-green-500 disabled:opacity-50",
                        r#type: "submit",
                        disabled: submitting(),
                        {submit_label(submitting(), "Log In")}
                    }
                }
                p { class: "mt-4 text-sm text-gray-500",
                    "No account yet? "
                    Link { class: "font-semibold text-green-700", to: Route::Signup {}, "Sign up" }
                }
            }
        }
    }
}

/// Signup page component.
#[component]
pub fn Signup() -> Element {
    let app = use_app();
    let nav = navigator();
    let recaptcha = use_recaptcha();
    let mut form = use_signal(RegistrationForm::default);
    let mut submitting = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let site_key = app.config().recaptcha_site_key;
    let bot_check_enabled = site_key.is_some();

    let onsubmit = move |e: FormEvent| {
        e.prevent_default();
        if submitting() {
            return;
        }
        error.set(None);
        submitting.set(true);

        let flow = app.auth_flow();
        let form = form();
        spawn(async move {
            let bot: &dyn BotCheck = if flow.bot_check_enabled() {
                &recaptcha
            } else {
                &NoBotCheck
            };
            let result = flow.register(&form, bot).await;
            submitting.set(false);
            match result {
                Ok(_) => {
                    nav.push(Route::Dashboard {});
                }
                Err(e) => error.set(Some(failure_message(&e))),
            }
        });
    };

    let submit_blocked = submitting() || (bot_check_enabled && !recaptcha.has_token());

    rsx! {
        Layout { title: "Sign Up", nav_active: "signup", public: true,
            AuthCard { title: "Sign Up", subtitle: "Create your account and start receiving paid survey invitations.",
                form { class: "space-y-4", onsubmit,
                    div { class: "grid gap-4 md:grid-cols-2",
                        Field {
                            id: "firstName", label: "First Name", placeholder: "First name",
                            value: form.read().first_name.clone(),
                            oninput: move |v| form.write().first_name = v,
                        }
                        Field {
                            id: "lastName", label: "Last Name", placeholder: "Last name",
                            value: form.read().last_name.clone(),
                            oninput: move |v| form.write().last_name = v,
                        }
                    }
                    Field {
                        id: "addressLine1", label: "Your address (line 1):", placeholder: "Street and number",
                        value: form.read().address_line1.clone(),
                        oninput: move |v| form.write().address_line1 = v,
                    }
                    Field {
                        id: "addressLine2", label: "Your address (line 2):", required: false,
                        placeholder: "Apartment, suite, etc. (optional)",
                        value: form.read().address_line2.clone(),
                        oninput: move |v| form.write().address_line2 = v,
                    }
                    div { class: "grid gap-4 md:grid-cols-3",
                        div {
                            Field {
                                id: "zipCode", label: "What is your ZIP code?", placeholder: "00000",
                                value: form.read().zip_code.clone(),
                                oninput: move |v| form.write().zip_code = v,
                            }
                            p { class: "mt-1 text-xs text-gray-500", "Please use the 5-digit format for your ZIP Code (e.g. 00000)" }
                        }
                        Field {
                            id: "age", label: "Age", kind: "number", placeholder: "18",
                            value: form.read().age.clone(),
                            oninput: move |v| form.write().age = v,
                        }
                        div {
                            label { class: LABEL_CLASS, r#for: "gender", "Gender" }
                            select {
                                class: INPUT_CLASS,
                                id: "gender",
                                name: "gender",
                                required: true,
                                value: "{form.read().gender}",
                                onchange: move |e| form.write().gender = e.value(),
                                option { value: "", disabled: true, "Select gender" }
                                option { value: "male", "Male" }
                                option { value: "female", "Female" }
                            }
                        }
                    }
                    Field {
                        id: "email", label: "Email", kind: "email", placeholder: "you@example.com",
                        value: form.read().email.clone(),
                        oninput: move |v| form.write().email = v,
                    }
                    Field {
                        id: "password", label: "Password", kind: "password", placeholder: "Minimum 8 characters",
                        value: form.read().password.clone(),
                        oninput: move |v| form.write().password = v,
                    }
                    Field {
                        id: "confirmPassword", label: "Confirm Password", kind: "password", placeholder: "Repeat your password",
                        value: form.read().confirm_password.clone(),
                        oninput: move |v| form.write().confirm_password = v,
                    }

                    div { class: "rounded-md bg-gray-50 p-4 text-sm text-gray-600",
                        p { class: "mb-2",
                            "We care about your privacy. By accepting the fields below, you agree to share your personal data with us to receive our surveys and earn rewards for your participation."
                        }
                        label { class: "flex items-start gap-2",
                            input {
                                r#type: "checkbox",
                                name: "acceptAll",
                                required: true,
                                checked: form.read().accept_all,
                                onchange: move |e| form.write().accept_all = e.checked(),
                            }
                            span {
                                "I accept the "
                                Link { class: "font-semibold text-green-700", to: Route::Privacy {}, "Privacy Policy" }
                                ", "
                                Link { class: "font-semibold text-green-700", to: Route::Cookies {}, "Cookies Policy" }
                                " and "
                                Link { class: "font-semibold text-green-700", to: Route::Terms {}, "Terms and Conditions" }
                                " of this website."
                            }
                        }
                    }

                    if let Some(key) = site_key.clone() {
                        div {
                            p { class: "text-sm text-gray-600", "Please interact with the CAPTCHA below:" }
                            Recaptcha { site_key: key, handle: recaptcha }
                        }
                    }

                    if let Some(message) = error() {
                        p { class: "status-err text-sm", "{message}" }
                    }
                    button {
                        class: "w-full rounded-md bg-green-600 px-4 py-2 font-semibold text-white hover:bg-green-500 disabled:opacity-50",
                        r#type: "submit",
                        disabled: submit_blocked,
                        {submit_label(submitting(), "Create Account")}
                    }
                }
                p { class: "mt-4 text-sm text-gray-500",
                    "Already have an account? "
                    Link { class: "font-semibold text-green-700", to: Route::Login {}, "Log in" }
                }
            }
        }
    }
}
