//! Public landing page.

use dioxus::prelude::*;

use crate::app::components::Layout;
use crate::app::Route;

struct Step {
    title: &'static str,
    description: &'static str,
}

struct Faq {
    question: &'static str,
    answer: &'static str,
}

const STEPS: [Step; 3] = [
    Step {
        title: "Create your free account",
        description: "Tell us your country and interests so we can send relevant surveys to your inbox.",
    },
    Step {
        title: "Answer paid surveys",
        description: "Complete fast surveys from trusted brands and collect points for each valid response.",
    },
    Step {
        title: "Redeem rewards",
        description: "Convert your points into PayPal cash or popular gift cards as soon as you reach the threshold.",
    },
];

const PERKS: [&str; 4] = [
    "Available in multiple countries and languages",
    "Simple surveys designed for mobile and desktop",
    "Secure payouts and transparent reward system",
    "Friendly support team that answers quickly",
];

const FAQS: [Faq; 3] = [
    Faq {
        question: "How much can I earn?",
        answer: "Earnings depend on your profile and survey availability in your country. Most users redeem small but frequent rewards.",
    },
    Faq {
        question: "How do I get paid?",
        answer: "Once you reach the minimum points, you can request PayPal cash or gift cards from available partners.",
    },
    Faq {
        question: "How often will I receive surveys?",
        answer: "Surveys and offers are available directly through our Offer Wall. Availability depends on active campaigns and how well your profile matches advertiser requirements, so check back regularly.",
    },
];

const POPULAR_REWARDS: [&str; 4] = ["Amazon", "PayPal", "Visa", "Bank"];

#[component]
pub fn Landing() -> Element {
    rsx! {
        Layout { title: "Home", nav_active: "home", public: true,
            section { class: "grid gap-12 md:grid-cols-2 md:items-center py-8",
                div {
                    p { class: "mb-4 inline-flex rounded-full border border-green-600 px-4 py-1 text-xs uppercase tracking-widest text-green-700",
                        "Paid Online Surveys"
                    }
                    h1 { class: "text-4xl font-extrabold leading-tight md:text-6xl",
                        "Share your opinion."
                        br {}
                        "Earn real rewards."
                    }
                    p { class: "mt-6 max-w-xl text-gray-600 md:text-lg",
                        "Join a global survey community and get rewarded for quick, secure, and easy surveys from home."
                    }
                    div { class: "mt-8 flex flex-wrap gap-4",
                        Link {
                            to: Route::Signup {},
                            class: "rounded-full bg-green-600 px-6 py-3 text-sm font-bold text-white hover:bg-green-500",
                            "Sign Up Today"
                        }
                        a {
                            href: "#how-it-works",
                            class: "rounded-full border border-gray-300 px-6 py-3 text-sm font-bold hover:border-gray-600",
                            "Learn More"
                        }
                    }
                    p { class: "mt-10 text-2xl font-extrabold text-green-700", "Surveys available worldwide." }
                    p { class: "text-xs uppercase tracking-wide text-gray-500",
                        "Trusted survey partners, secure payouts, U.S. focused"
                    }
                }
                div { class: "card",
                    p { class: "mb-4 text-sm font-semibold text-green-700", "Popular Rewards" }
                    div { class: "grid grid-cols-2 gap-3",
                        for reward in POPULAR_REWARDS {
                            div {
                                key: "{reward}",
                                class: "rounded-2xl border border-gray-200 bg-gray-50 px-4 py-6 text-center text-sm font-semibold",
                                "{reward}"
                            }
                        }
                    }
                    p { class: "mt-5 text-sm text-gray-600",
                        "Complete surveys, collect points, and redeem your rewards safely."
                    }
                }
            }

            section { id: "how-it-works", class: "card mt-8",
                p { class: "mb-3 text-xs font-bold uppercase tracking-widest text-green-700", "How It Works" }
                h2 { class: "max-w-2xl text-3xl font-extrabold", "Start in minutes and turn your time into rewards" }
                div { class: "mt-8 grid gap-6 md:grid-cols-3",
                    for (number, step) in (1..).zip(STEPS.iter()) {
                        article { key: "{step.title}", class: "rounded-2xl border border-gray-200 bg-gray-50 p-6",
                            p { class: "mb-4 text-sm font-black text-green-700", "0{number}" }
                            h3 { class: "text-xl font-bold", "{step.title}" }
                            p { class: "mt-3 text-gray-600", "{step.description}" }
                        }
                    }
                }
            }

            section { id: "rewards", class: "mt-12",
                p { class: "mb-3 text-xs font-bold uppercase tracking-widest text-green-700", "Why People Join" }
                h2 { class: "text-3xl font-extrabold", "Reliable surveys, transparent payouts, global community" }
                p { class: "mt-5 text-gray-600",
                    "We partner with research companies that value real opinions. Every completed survey brings you closer to your next reward."
                }
                ul { class: "mt-6 space-y-3",
                    for perk in PERKS {
                        li { key: "{perk}", class: "flex items-start gap-3",
                            span { class: "text-green-600", "*" }
                            span { "{perk}" }
                        }
                    }
                }
            }

            section { id: "faq", class: "card mt-12",
                p { class: "mb-3 text-xs font-bold uppercase tracking-widest text-green-700", "FAQ" }
                h2 { class: "text-3xl font-extrabold", "Everything you need to know before joining" }
                div { class: "mt-6 space-y-4",
                    for faq in FAQS.iter() {
                        article { key: "{faq.question}", class: "rounded-2xl border border-gray-200 p-5",
                            h3 { class: "text-lg font-bold", "{faq.question}" }
                            p { class: "mt-2 text-gray-600", "{faq.answer}" }
                        }
                    }
                }
            }

            section { id: "join", class: "mt-12 rounded-3xl bg-gradient-to-r from-green-300 to-emerald-300 p-8 md:p-12",
                h2 { class: "max-w-2xl text-3xl font-black leading-tight md:text-5xl",
                    "Join SURVEX today and start earning with your opinion."
                }
                p { class: "mt-4 max-w-2xl md:text-lg",
                    "Registration is free. It only takes a moment to create your profile and receive your first survey invitation."
                }
                Link {
                    to: Route::Signup {},
                    class: "mt-8 inline-flex rounded-full bg-gray-900 px-7 py-3 text-sm font-bold text-white hover:bg-gray-800",
                    "Create Free Account"
                }
            }
        }
    }
}
