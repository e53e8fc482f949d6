use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api;
use crate::app::Route;
use crate::auth;
use crate::chat::state::{
    self, ChatAction, ChatState, DeleteFallback, DEFAULT_SESSION_TITLE,
};
use crate::components::Navbar;

#[derive(Clone, PartialEq, Default)]
struct ContextMenu {
    visible: bool,
    x: i32,
    y: i32,
    session_id: Option<String>,
}

async fn load_history(dispatcher: UseReducerDispatcher<ChatState>, token: String, session_id: String) {
    match api::get_session_messages(&token, &session_id).await {
        Ok(result) => dispatcher.dispatch(ChatAction::HistoryLoaded {
            session_id,
            messages: result.messages,
        }),
        Err(err) => {
            web_sys::console::warn_1(&format!("History load failed: {err}").into());
            dispatcher.dispatch(ChatAction::HistoryFailed { session_id });
        }
    }
}

async fn create_session(dispatcher: UseReducerDispatcher<ChatState>, token: String) {
    match api::create_session(&token, DEFAULT_SESSION_TITLE).await {
        Ok(created) => dispatcher.dispatch(ChatAction::SessionCreated(created.session)),
        Err(err) => {
            web_sys::console::error_1(&format!("Session create failed: {err}").into());
        }
    }
}

#[function_component(ChatLayout)]
pub fn chat_layout() -> Html {
    let chat = use_reducer(ChatState::default);
    let draft = use_state(String::new);
    let menu = use_state(ContextMenu::default);
    let show_profile = use_state(|| false);
    let navigator = use_navigator().unwrap();

    // Initial load: token check, session list, history of the first session.
    {
        let dispatcher = chat.dispatcher();
        let navigator = navigator.clone();
        use_effect_with((), move |_| {
            let store = auth::shared();
            match store.token() {
                None => navigator.push(&Route::Login),
                Some(token) => spawn_local(async move {
                    match api::get_sessions(&token).await {
                        Ok(result) if !result.sessions.is_empty() => {
                            let first_id = result.sessions[0].id.clone();
                            dispatcher.dispatch(ChatAction::SessionsLoaded(result.sessions));
                            load_history(dispatcher, token, first_id).await;
                        }
                        Ok(_) => create_session(dispatcher, token).await,
                        Err(err) if err.is_auth() => {
                            auth::shared().clear();
                            navigator.push(&Route::Login);
                        }
                        Err(err) => {
                            web_sys::console::error_1(
                                &format!("Session list failed: {err}").into(),
                            );
                        }
                    }
                }),
            }
            || ()
        });
    }

    // Push the pending title update, at most once per session lifetime.
    {
        let dispatcher = chat.dispatcher();
        use_effect_with(chat.title_request.clone(), move |pending| {
            if let Some(req) = pending.clone() {
                dispatcher.dispatch(ChatAction::TitleRequestTaken);
                let dispatcher = dispatcher.clone();
                spawn_local(async move {
                    let token = auth::shared().token().unwrap_or_default();
                    match api::update_session(&token, &req.session_id, &req.title).await {
                        Ok(()) => dispatcher.dispatch(ChatAction::TitleUpdated {
                            session_id: req.session_id,
                            title: req.title,
                        }),
                        Err(err) => {
                            web_sys::console::warn_1(
                                &format!("Title update failed: {err}").into(),
                            );
                        }
                    }
                });
            }
            || ()
        });
    }

    let send = {
        let chat = chat.clone();
        let draft = draft.clone();
        Callback::from(move |_| {
            let text = draft.trim().to_string();
            if text.is_empty() || chat.is_sending() {
                return;
            }
            let Some(session_id) = chat.current_session_id.clone() else {
                return;
            };
            draft.set(String::new());
            chat.dispatch(ChatAction::BeginSend { text: text.clone() });

            let dispatcher = chat.dispatcher();
            spawn_local(async move {
                let token = auth::shared().token().unwrap_or_default();
                match api::send_session_message(&token, &session_id, &text).await {
                    Ok(reply) => dispatcher.dispatch(ChatAction::Settle {
                        session_id,
                        response: reply.response,
                        intent: reply.intent,
                    }),
                    Err(err) => {
                        web_sys::console::error_1(&format!("Send failed: {err}").into());
                        dispatcher.dispatch(ChatAction::Fail { session_id });
                    }
                }
                dispatcher.dispatch(ChatAction::Finish);
            });
        })
    };

    let on_draft = {
        let draft = draft.clone();
        Callback::from(move |event: InputEvent| {
            let input = event.target_unchecked_into::<web_sys::HtmlTextAreaElement>();
            draft.set(input.value());
        })
    };

    let on_keydown = {
        let send = send.clone();
        Callback::from(move |event: KeyboardEvent| {
            if event.key() == "Enter" && !event.shift_key() {
                event.prevent_default();
                send.emit(());
            }
        })
    };

    let on_send_click = {
        let send = send.clone();
        Callback::from(move |_: MouseEvent| send.emit(()))
    };

    let select_chat = {
        let chat = chat.clone();
        Callback::from(move |session_id: String| {
            if chat.current_session_id.as_deref() == Some(session_id.as_str()) {
                return;
            }
            chat.dispatch(ChatAction::SelectSession(session_id.clone()));
            let dispatcher = chat.dispatcher();
            spawn_local(async move {
                let token = auth::shared().token().unwrap_or_default();
                load_history(dispatcher, token, session_id).await;
            });
        })
    };

    let new_chat = {
        let dispatcher = chat.dispatcher();
        Callback::from(move |_: MouseEvent| {
            let dispatcher = dispatcher.clone();
            spawn_local(async move {
                let token = auth::shared().token().unwrap_or_default();
                create_session(dispatcher, token).await;
            });
        })
    };

    let open_menu = {
        let menu = menu.clone();
        Callback::from(move |(event, session_id): (MouseEvent, String)| {
            event.prevent_default();
            let (mut width, mut height) = (i32::MAX, i32::MAX);
            if let Some(window) = web_sys::window() {
                width = window
                    .inner_width()
                    .ok()
                    .and_then(|v| v.as_f64())
                    .map_or(i32::MAX, |v| v as i32);
                height = window
                    .inner_height()
                    .ok()
                    .and_then(|v| v.as_f64())
                    .map_or(i32::MAX, |v| v as i32);
            }
            let (x, y) = state::clamp_menu_position(event.client_x(), event.client_y(), width, height);
            menu.set(ContextMenu {
                visible: true,
                x,
                y,
                session_id: Some(session_id),
            });
        })
    };

    let close_menu = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| {
            if menu.visible {
                menu.set(ContextMenu::default());
            }
        })
    };

    let delete_chat = {
        let chat = chat.clone();
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(session_id) = menu.session_id.clone() else {
                return;
            };
            menu.set(ContextMenu::default());

            let Some(window) = web_sys::window() else {
                return;
            };
            if !chat.can_delete() {
                let _ = window.alert_with_message(
                    "Please wait for the current reply before deleting this chat.",
                );
                return;
            }
            let title = chat
                .session_title(&session_id)
                .unwrap_or(DEFAULT_SESSION_TITLE)
                .to_string();
            let confirmed = window
                .confirm_with_message(&format!(
                    "Are you sure you want to delete \"{title}\"? This action cannot be undone."
                ))
                .unwrap_or(false);
            if !confirmed {
                return;
            }

            let fallback = chat.delete_fallback(&session_id);
            let dispatcher = chat.dispatcher();
            spawn_local(async move {
                let token = auth::shared().token().unwrap_or_default();
                match api::delete_session(&token, &session_id).await {
                    Ok(()) => {
                        dispatcher.dispatch(ChatAction::RemoveSession(session_id));
                        match fallback {
                            DeleteFallback::KeepCurrent => {}
                            DeleteFallback::Select(next_id) => {
                                dispatcher.dispatch(ChatAction::SelectSession(next_id.clone()));
                                load_history(dispatcher, token, next_id).await;
                            }
                            DeleteFallback::CreateNew => create_session(dispatcher, token).await,
                        }
                    }
                    Err(err) => {
                        web_sys::console::error_1(&format!("Delete failed: {err}").into());
                        if let Some(window) = web_sys::window() {
                            let _ = window
                                .alert_with_message("Failed to delete chat. Please try again.");
                        }
                    }
                }
            });
        })
    };

    let toggle_profile = {
        let show_profile = show_profile.clone();
        Callback::from(move |_: MouseEvent| show_profile.set(!*show_profile))
    };

    let on_logout = {
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| {
            let navigator = navigator.clone();
            spawn_local(async move {
                auth::logout(&auth::shared()).await;
                navigator.push(&Route::Home);
            });
        })
    };

    let user = auth::shared().current_user();

    html! {
        <div onclick={close_menu} style="display:flex; flex-direction:column; height:100vh; background:#151929; color:#e0e6f3;">
            <Navbar />
            <div style="display:flex; flex:1; min-height:0; padding-top:64px;">
                <aside style="width:260px; display:flex; flex-direction:column; background:#1d2235; border-right:1px solid #2b3150;">
                    <div style="padding:1em;">
                        <button onclick={new_chat}
                            style="width:100%; padding:0.7em; border:none; border-radius:8px; background:#7c8fe0; color:#1d2235; cursor:pointer;">
                            { "+ New Chat" }
                        </button>
                    </div>
                    <div style="flex:1; overflow-y:auto; padding:0 0.5em;">
                        { for chat.sessions.iter().map(|session| {
                            let id = session.id.clone();
                            let select = {
                                let select_chat = select_chat.clone();
                                let id = id.clone();
                                Callback::from(move |_: MouseEvent| select_chat.emit(id.clone()))
                            };
                            let context = {
                                let open_menu = open_menu.clone();
                                let id = id.clone();
                                Callback::from(move |event: MouseEvent| open_menu.emit((event, id.clone())))
                            };
                            html! {
                                <div key={session.id.clone()}
                                    onclick={select}
                                    oncontextmenu={context}
                                    style={format!(
                                        "padding:0.7em; margin-bottom:0.3em; border-radius:8px; cursor:pointer; white-space:nowrap; overflow:hidden; text-overflow:ellipsis; background:{};",
                                        if session.active { "#2b3150" } else { "transparent" }
                                    )}>
                                    { &session.title }
                                </div>
                            }
                        })}
                    </div>
                    <div onclick={toggle_profile}
                        style="padding:1em; border-top:1px solid #2b3150; cursor:pointer;">
                        { user.as_ref().map_or_else(|| "Account".to_string(), |u| u.full_name.clone()) }
                    </div>
                </aside>
                <main style="flex:1; display:flex; flex-direction:column; min-width:0;">
                    <div style="flex:1; overflow-y:auto; padding:1.5em;">
                        { for chat.entries.iter().map(|entry| {
                            let (align, background, color) = if entry.is_user {
                                ("flex-end", "#7c8fe0", "#1d2235")
                            } else {
                                ("flex-start", "#1d2235", "#e0e6f3")
                            };
                            html! {
                                <div key={entry.id.clone()} style={format!("display:flex; justify-content:{align}; margin-bottom:0.8em;")}>
                                    <div style={format!("max-width:70%; padding:0.8em 1em; border-radius:12px; background:{background}; color:{color};")}>
                                        <div style="white-space:pre-wrap;">{ &entry.text }</div>
                                        { if let Some(ref intent) = entry.intent {
                                            html! { <div style="margin-top:0.4em; font-size:0.75em; color:#8b93ad;">{ intent.clone() }</div> }
                                        } else {
                                            html! {}
                                        }}
                                    </div>
                                </div>
                            }
                        })}
                        { if chat.is_sending() {
                            html! {
                                <div style="display:flex; justify-content:flex-start;">
                                    <div style="padding:0.8em 1em; border-radius:12px; background:#1d2235; color:#8b93ad;">
                                        { "SereNova is typing..." }
                                    </div>
                                </div>
                            }
                        } else {
                            html! {}
                        }}
                    </div>
                    <div style="padding:1em 1.5em; border-top:1px solid #2b3150; display:flex; gap:0.8em;">
                        <textarea
                            value={(*draft).clone()}
                            oninput={on_draft}
                            onkeydown={on_keydown}
                            disabled={chat.is_sending()}
                            rows="1"
                            placeholder="Share what's on your mind..."
                            style="flex:1; resize:none; padding:0.8em; border-radius:8px; border:1px solid #2b3150; background:#1d2235; color:#e0e6f3;"
                        />
                        <button onclick={on_send_click} disabled={chat.is_sending()}
                            style="padding:0.8em 1.5em; border:none; border-radius:8px; background:#7c8fe0; color:#1d2235; cursor:pointer;">
                            { "Send" }
                        </button>
                    </div>
                </main>
            </div>
            { if menu.visible {
                html! {
                    <div style={format!(
                        "position:fixed; left:{}px; top:{}px; width:150px; background:#1d2235; border:1px solid #2b3150; border-radius:8px; z-index:40; overflow:hidden;",
                        menu.x, menu.y
                    )}>
                        <button onclick={delete_chat}
                            style="width:100%; padding:0.7em; border:none; background:transparent; color:#e07878; text-align:left; cursor:pointer;">
                            { "Delete chat" }
                        </button>
                    </div>
                }
            } else {
                html! {}
            }}
            { if *show_profile {
                html! {
                    <div style="position:fixed; left:1em; bottom:4.5em; width:228px; background:#1d2235; border:1px solid #2b3150; border-radius:8px; padding:1em; z-index:40;">
                        { if let Some(ref user) = user {
                            html! {
                                <>
                                    <div style="font-weight:bold;">{ &user.full_name }</div>
                                    <div style="color:#8b93ad; font-size:0.85em; margin-bottom:0.8em;">{ &user.email }</div>
                                </>
                            }
                        } else {
                            html! { <div style="color:#8b93ad; margin-bottom:0.8em;">{ "Signed in" }</div> }
                        }}
                        <button onclick={on_logout}
                            style="width:100%; padding:0.6em; border:1px solid #e07878; border-radius:6px; background:transparent; color:#e07878; cursor:pointer;">
                            { "Logout" }
                        </button>
                    </div>
                }
            } else {
                html! {}
            }}
        </div>
    }
}
