use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::auth;
use crate::types::Playlist;

const PRESET_MOODS: [(&str, &str); 8] = [
    ("anxious", "😰 Anxious"),
    ("sad", "😢 Sad"),
    ("stressed", "😫 Stressed"),
    ("happy", "😊 Happy"),
    ("calm", "😌 Calm"),
    ("energetic", "⚡ Energetic"),
    ("focused", "🎯 Focused"),
    ("sleepy", "😴 Sleepy"),
];

#[derive(Properties, PartialEq)]
pub struct PlaylistModalProps {
    pub open: bool,
    pub on_close: Callback<MouseEvent>,
}

#[function_component(PlaylistModal)]
pub fn playlist_modal(props: &PlaylistModalProps) -> Html {
    let mood = use_state(String::new);
    let playlists = use_state(Vec::<Playlist>::new);
    let is_loading = use_state(|| false);
    let error = use_state(String::new);

    let lookup = {
        let mood = mood.clone();
        let playlists = playlists.clone();
        let is_loading = is_loading.clone();
        let error = error.clone();
        Callback::from(move |selected: String| {
            mood.set(selected.clone());
            error.set(String::new());
            playlists.set(Vec::new());
            is_loading.set(true);

            let playlists = playlists.clone();
            let is_loading = is_loading.clone();
            let error = error.clone();
            spawn_local(async move {
                let token = auth::shared().token().unwrap_or_default();
                match api::get_playlists(&token, &selected).await {
                    Ok(result) => playlists.set(result.playlists),
                    Err(err) => {
                        web_sys::console::error_1(&format!("Playlist error: {err}").into());
                        error.set("Failed to load playlists. Please try again.".to_string());
                    }
                }
                is_loading.set(false);
            });
        })
    };

    let on_mood_input = {
        let mood = mood.clone();
        Callback::from(move |event: InputEvent| {
            let input = event.target_unchecked_into::<web_sys::HtmlInputElement>();
            mood.set(input.value());
        })
    };

    let on_custom_mood = {
        let mood = mood.clone();
        let error = error.clone();
        let lookup = lookup.clone();
        Callback::from(move |_: MouseEvent| {
            let value = mood.trim().to_string();
            if value.is_empty() {
                error.set("Please enter a mood".to_string());
                return;
            }
            lookup.emit(value);
        })
    };

    if !props.open {
        return html! {};
    }

    html! {
        <div style="position:fixed; inset:0; background:rgba(0,0,0,0.5); display:flex; align-items:center; justify-content:center; z-index:50;">
            <div style="background:#1d2235; color:#e0e6f3; border-radius:12px; padding:2em; width:100%; max-width:640px; max-height:90vh; overflow-y:auto;">
                <div style="display:flex; align-items:center; justify-content:space-between; margin-bottom:1em;">
                    <h2 style="margin:0;">{ "Mood-Based Playlists" }</h2>
                    <button onclick={props.on_close.clone()} style="background:none; border:none; color:#8b93ad; font-size:1.2em; cursor:pointer;">{ "✕" }</button>
                </div>
                <p style="color:#8b93ad;">
                    { "Select your current mood and we'll recommend Spotify playlists to help improve your mental wellbeing." }
                </p>
                <div style="display:grid; grid-template-columns:repeat(4, 1fr); gap:0.5em; margin:1em 0;">
                    { for PRESET_MOODS.iter().map(|(value, label)| {
                        let lookup = lookup.clone();
                        let value = value.to_string();
                        let selected = *mood == value;
                        html! {
                            <button
                                onclick={Callback::from(move |_| lookup.emit(value.clone()))}
                                disabled={*is_loading}
                                style={format!(
                                    "padding:0.6em; border-radius:8px; cursor:pointer; border:1px solid {};",
                                    if selected { "#7c8fe0" } else { "#2b3150" }
                                )}
                            >
                                { label }
                            </button>
                        }
                    })}
                </div>
                <div style="display:flex; gap:0.5em; margin-bottom:1em;">
                    <input
                        type="text"
                        value={(*mood).clone()}
                        oninput={on_mood_input}
                        placeholder="Or type your mood..."
                        disabled={*is_loading}
                        style="flex:1; padding:0.6em; border-radius:8px; border:1px solid #2b3150; background:#151929; color:#e0e6f3;"
                    />
                    <button onclick={on_custom_mood} disabled={*is_loading} style="padding:0.6em 1.2em; border:none; border-radius:8px; background:#7c8fe0; color:#1d2235; cursor:pointer;">
                        { "Search" }
                    </button>
                </div>
                { if !error.is_empty() {
                    html! { <div style="padding:0.8em; border:1px solid #e07878; border-radius:8px; color:#e07878; margin-bottom:1em;">{ (*error).clone() }</div> }
                } else {
                    html! {}
                }}
                { if *is_loading {
                    html! { <p style="color:#8b93ad;">{ "Finding the perfect playlists for you..." }</p> }
                } else if !playlists.is_empty() {
                    html! {
                        <div>
                            <h3>{ "Recommended Playlists" }</h3>
                            { for playlists.iter().map(|playlist| html! {
                                <div style="border:1px solid #2b3150; border-radius:8px; padding:1em; margin-bottom:0.8em;">
                                    <div style="display:flex; align-items:flex-start; justify-content:space-between; gap:1em;">
                                        <div style="flex:1;">
                                            <h4 style="margin:0 0 0.4em 0;">{ &playlist.name }</h4>
                                            <p style="margin:0 0 0.4em 0; color:#8b93ad; font-size:0.9em;">{ &playlist.description }</p>
                                            { if let Some(ref mood) = playlist.mood {
                                                html! { <span style="font-size:0.8em; color:#8b93ad;">{ format!("Mood: {mood}") }</span> }
                                            } else {
                                                html! {}
                                            }}
                                        </div>
                                        { if let Some(ref url) = playlist.spotify_url {
                                            html! {
                                                <a href={url.clone()} target="_blank" rel="noopener noreferrer" style="padding:0.5em 1em; background:#1db954; color:white; border-radius:8px; text-decoration:none;">
                                                    { "Open" }
                                                </a>
                                            }
                                        } else {
                                            html! {}
                                        }}
                                    </div>
                                </div>
                            })}
                        </div>
                    }
                } else {
                    html! { <p style="color:#8b93ad; text-align:center; padding:2em 0;">{ "Select a mood above to get personalized playlist recommendations" }</p> }
                }}
            </div>
        </div>
    }
}
