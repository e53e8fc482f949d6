use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api;
use crate::app::Route;
use crate::auth;
use crate::components::Navbar;

const PREVIEW_GREETING: &str =
    "Hello! I'm SeraNova, your personal mental health companion. How are you feeling today?";
const PREVIEW_FALLBACK: &str = "Sorry, I'm having trouble connecting. Try the full chat interface!";

const BENEFITS: [(&str, &str); 4] = [
    (
        "Always Available",
        "Support whenever you need it, day or night, without appointments or waiting rooms.",
    ),
    (
        "Private & Secure",
        "Your conversations stay between you and SereNova. No judgement, complete privacy.",
    ),
    (
        "Personalized Support",
        "Responses tuned to how you're feeling, from calming exercises to mood-based playlists.",
    ),
    (
        "Track Your Journey",
        "Your chat history is saved so you can look back and see how far you've come.",
    ),
];

const TESTIMONIALS: [(&str, &str); 3] = [
    (
        "Maya R.",
        "SereNova helped me through some really anxious nights. Just having somewhere to put my thoughts made a difference.",
    ),
    (
        "Jordan T.",
        "The playlist suggestions are a small thing but they genuinely lift my mood when I'm stuck.",
    ),
    (
        "Priya S.",
        "I was skeptical about talking to an app, but it never judges and it's there at 3am when nobody else is.",
    ),
];

#[derive(Clone, PartialEq)]
struct PreviewEntry {
    text: String,
    is_user: bool,
}

#[function_component(HomePage)]
pub fn home_page() -> Html {
    let entries = use_state(|| {
        vec![PreviewEntry {
            text: PREVIEW_GREETING.to_string(),
            is_user: false,
        }]
    });
    let draft = use_state(String::new);
    let is_sending = use_state(|| false);
    let navigator = use_navigator().unwrap();

    // Signed-in visitors go straight to the full chat.
    {
        let navigator = navigator.clone();
        use_effect_with((), move |_| {
            if auth::shared().is_authenticated() {
                navigator.push(&Route::Chat);
            }
            || ()
        });
    }

    let on_draft = {
        let draft = draft.clone();
        Callback::from(move |event: InputEvent| {
            let input = event.target_unchecked_into::<web_sys::HtmlInputElement>();
            draft.set(input.value());
        })
    };

    let send_preview = {
        let entries = entries.clone();
        let draft = draft.clone();
        let is_sending = is_sending.clone();
        Callback::from(move |_| {
            let text = draft.trim().to_string();
            if text.is_empty() || *is_sending {
                return;
            }
            draft.set(String::new());

            let mut next = (*entries).clone();
            next.push(PreviewEntry {
                text: text.clone(),
                is_user: true,
            });
            entries.set(next.clone());
            is_sending.set(true);

            let entries = entries.clone();
            let is_sending = is_sending.clone();
            spawn_local(async move {
                let reply = match api::send_message_public(&text).await {
                    Ok(reply) => reply.response,
                    Err(err) => {
                        web_sys::console::warn_1(&format!("Preview chat failed: {err}").into());
                        PREVIEW_FALLBACK.to_string()
                    }
                };
                next.push(PreviewEntry {
                    text: reply,
                    is_user: false,
                });
                entries.set(next);
                is_sending.set(false);
            });
        })
    };

    let on_keydown = {
        let send_preview = send_preview.clone();
        Callback::from(move |event: KeyboardEvent| {
            if event.key() == "Enter" {
                event.prevent_default();
                send_preview.emit(());
            }
        })
    };

    let on_send_click = {
        let send_preview = send_preview.clone();
        Callback::from(move |_: MouseEvent| send_preview.emit(()))
    };

    let go_signup = {
        let navigator = navigator.clone();
        Callback::from(move |_| navigator.push(&Route::Signup))
    };

    html! {
        <div style="min-height:100vh; background:#151929; color:#e0e6f3;">
            <Navbar />
            <section style="display:flex; flex-wrap:wrap; gap:2em; align-items:center; justify-content:center; padding:8em 2em 4em;">
                <div style="max-width:480px;">
                    <h1 style="font-size:2.4em; margin-bottom:0.3em;">{ "Your mind deserves a safe place to talk" }</h1>
                    <p style="color:#8b93ad; font-size:1.1em; margin-bottom:1.5em;">
                        { "SereNova is an AI companion for your mental wellbeing. Talk through what's on your mind, anytime, in complete privacy." }
                    </p>
                    <button onclick={go_signup}
                        style="padding:0.9em 2em; border:none; border-radius:8px; background:#7c8fe0; color:#1d2235; font-size:1em; cursor:pointer;">
                        { "Get Started Free" }
                    </button>
                </div>
                <div style="width:100%; max-width:400px; background:#1d2235; border:1px solid #2b3150; border-radius:12px; display:flex; flex-direction:column; height:420px;">
                    <div style="padding:0.8em 1em; border-bottom:1px solid #2b3150; font-weight:bold;">{ "Try it out" }</div>
                    <div style="flex:1; overflow-y:auto; padding:1em;">
                        { for entries.iter().map(|entry| {
                            let (align, background, color) = if entry.is_user {
                                ("flex-end", "#7c8fe0", "#1d2235")
                            } else {
                                ("flex-start", "#2b3150", "#e0e6f3")
                            };
                            html! {
                                <div style={format!("display:flex; justify-content:{align}; margin-bottom:0.6em;")}>
                                    <div style={format!("max-width:80%; padding:0.6em 0.9em; border-radius:10px; background:{background}; color:{color};")}>
                                        { &entry.text }
                                    </div>
                                </div>
                            }
                        })}
                        { if *is_sending {
                            html! { <p style="color:#8b93ad; font-size:0.85em;">{ "SereNova is typing..." }</p> }
                        } else {
                            html! {}
                        }}
                    </div>
                    <div style="display:flex; gap:0.5em; padding:0.8em; border-top:1px solid #2b3150;">
                        <input
                            type="text"
                            value={(*draft).clone()}
                            oninput={on_draft}
                            onkeydown={on_keydown}
                            disabled={*is_sending}
                            placeholder="Say hello..."
                            style="flex:1; padding:0.6em; border-radius:8px; border:1px solid #2b3150; background:#151929; color:#e0e6f3;"
                        />
                        <button onclick={on_send_click} disabled={*is_sending}
                            style="padding:0.6em 1em; border:none; border-radius:8px; background:#7c8fe0; color:#1d2235; cursor:pointer;">
                            { "Send" }
                        </button>
                    </div>
                </div>
            </section>
            <section style="padding:3em 2em; max-width:1100px; margin:0 auto;">
                <h2 style="text-align:center; margin-bottom:1.5em;">{ "Why SereNova" }</h2>
                <div style="display:grid; grid-template-columns:repeat(auto-fit, minmax(220px, 1fr)); gap:1em;">
                    { for BENEFITS.iter().map(|(title, text)| html! {
                        <div style="background:#1d2235; border:1px solid #2b3150; border-radius:12px; padding:1.5em;">
                            <h3 style="margin-top:0;">{ *title }</h3>
                            <p style="color:#8b93ad; margin-bottom:0;">{ *text }</p>
                        </div>
                    })}
                </div>
            </section>
            <section style="padding:3em 2em 5em; max-width:1100px; margin:0 auto;">
                <h2 style="text-align:center; margin-bottom:1.5em;">{ "What people say" }</h2>
                <div style="display:grid; grid-template-columns:repeat(auto-fit, minmax(260px, 1fr)); gap:1em;">
                    { for TESTIMONIALS.iter().map(|(name, quote)| html! {
                        <div style="background:#1d2235; border:1px solid #2b3150; border-radius:12px; padding:1.5em;">
                            <p style="margin-top:0; font-style:italic;">{ format!("\u{201c}{quote}\u{201d}") }</p>
                            <span style="color:#8b93ad;">{ *name }</span>
                        </div>
                    })}
                </div>
            </section>
        </div>
    }
}
