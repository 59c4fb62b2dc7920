pub mod color;
pub mod data;
pub mod deck;
pub mod feedback;
pub mod history;
pub mod likes;

use std::ops::Deref;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::window;
use yew::prelude::*;

use color::Rgb;
use data::{fetch_profiles, Profile};
use deck::{Animation, DeckConfig, DeckEngine, DeckPhase, ReleaseOutcome};
use feedback::{FeedbackAction, FeedbackHandle, SwipeFeedback};
use history::SwipeDirection;
use likes::{LikesAction, LikesBoard, LikesHandle};

const SPLASH_MS: u32 = 2000;
const FALLBACK_VIEWPORT_WIDTH: f64 = 390.0;
const EMPTY_DECK_LABEL: &str = "You are all caught up";

const LIKE_ACCENT: Rgb = Rgb::new(0x1f, 0xc7, 0x73);
const NOPE_ACCENT: Rgb = Rgb::new(0xff, 0x3b, 0x62);
const NEUTRAL_ICON: Rgb = Rgb::new(0xb9, 0xbe, 0xc4);
const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

#[derive(PartialEq, Clone)]
enum FetchStatus {
    Loading,
    Idle,
    Error(String),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Home,
    Likes,
}

#[derive(Clone, PartialEq)]
struct DragOrigin {
    pointer_id: i32,
    start_x: f64,
    start_y: f64,
}

/// Imperative handle over the deck, built by the screen shell at
/// composition time and handed to the action bar.
#[derive(Clone, PartialEq)]
pub struct DeckCommands {
    pub swipe_left: Callback<()>,
    pub swipe_right: Callback<()>,
    pub rewind: Callback<()>,
}

fn viewport_width() -> f64 {
    window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|value| value.as_f64())
        .unwrap_or(FALLBACK_VIEWPORT_WIDTH)
}

#[function_component(App)]
fn app() -> Html {
    let splash_done = use_state(|| false);
    let active_tab = use_state(|| Tab::Home);
    let likes = use_reducer(LikesBoard::load);

    {
        let splash_done = splash_done.clone();
        use_effect_with_deps(
            move |_| {
                let timeout = Timeout::new(SPLASH_MS, move || splash_done.set(true));
                move || drop(timeout)
            },
            (),
        );
    }

    if !*splash_done {
        return html! {
            <div class="splash-screen">
                <span class="splash-logo">{ "matchdeck" }</span>
            </div>
        };
    }

    let select_tab = |tab: Tab| {
        let active_tab = active_tab.clone();
        Callback::from(move |_: MouseEvent| active_tab.set(tab))
    };

    let tab_class = |tab: Tab| {
        classes!(
            "tab-button",
            if *active_tab == tab { Some("active") } else { None }
        )
    };

    // Both screens stay mounted so switching tabs does not reset the
    // deck session; the inactive one is hidden.
    let screen_class = |tab: Tab| {
        classes!(
            "screen",
            if *active_tab == tab { None } else { Some("hidden") }
        )
    };

    html! {
        <ContextProvider<LikesHandle> context={likes.clone()}>
            <div class="app-container">
                <div class={screen_class(Tab::Home)}>
                    <HomeScreen />
                </div>
                <div class={screen_class(Tab::Likes)}>
                    <LikesScreen />
                </div>
                <nav class="tab-bar">
                    <button class={tab_class(Tab::Home)} onclick={select_tab(Tab::Home)}>
                        <span class="tab-icon">{ "♥" }</span>
                        <span>{ "Home" }</span>
                    </button>
                    <button class={tab_class(Tab::Likes)} onclick={select_tab(Tab::Likes)}>
                        <span class="tab-icon">{ "✦" }</span>
                        <span>{ "Likes" }</span>
                    </button>
                </nav>
            </div>
        </ContextProvider<LikesHandle>>
    }
}

#[function_component(HomeScreen)]
fn home_screen() -> Html {
    let status = use_state(|| FetchStatus::Loading);
    let profiles = use_state(|| None::<Vec<Profile>>);
    let engine = use_state(|| None::<DeckEngine>);
    let drag_origin = use_state(|| None::<DragOrigin>);
    let feedback = use_reducer(SwipeFeedback::default);
    let likes = use_context::<LikesHandle>();

    {
        let status = status.clone();
        let profiles = profiles.clone();

        use_effect_with_deps(
            move |_| {
                status.set(FetchStatus::Loading);
                spawn_local(async move {
                    match fetch_profiles().await {
                        Ok(fetched) => {
                            profiles.set(Some(fetched));
                            status.set(FetchStatus::Idle);
                        }
                        Err(err) => {
                            profiles.set(None);
                            status.set(FetchStatus::Error(err.to_string()));
                        }
                    }
                });
                || ()
            },
            (),
        );
    }

    // A new profile list means a new deck session. Deps compare by content,
    // so a re-fetch of an identical list does not reset the deck.
    {
        let engine = engine.clone();
        let feedback = feedback.clone();
        let drag_origin = drag_origin.clone();

        use_effect_with_deps(
            move |loaded: &Option<Vec<Profile>>| {
                match loaded {
                    Some(list) => {
                        engine.set(Some(DeckEngine::new(
                            list.clone(),
                            DeckConfig::default(),
                            viewport_width(),
                        )));
                        log::debug!("deck session reset, index 0");
                    }
                    None => engine.set(None),
                }
                feedback.dispatch(FeedbackAction::Reset);
                drag_origin.set(None);
                || ()
            },
            (*profiles).clone(),
        );
    }

    let Some(likes) = likes else {
        return html! {};
    };

    let trigger = |direction: SwipeDirection| {
        let engine = engine.clone();
        let feedback = feedback.clone();
        Callback::from(move |_: ()| {
            let Some(mut eng) = engine.deref().clone() else {
                return;
            };
            if eng.trigger_swipe(direction) {
                let (like, nope) = eng.feedback();
                feedback.dispatch(FeedbackAction::Drag { like, nope });
                engine.set(Some(eng));
            }
        })
    };

    let rewind = {
        let engine = engine.clone();
        let feedback = feedback.clone();
        Callback::from(move |_: ()| {
            let Some(mut eng) = engine.deref().clone() else {
                return;
            };
            if let Some(record) = eng.rewind() {
                log::debug!(
                    "rewound {} back to index {}",
                    record.profile.name,
                    record.index
                );
                feedback.dispatch(FeedbackAction::Reset);
                engine.set(Some(eng));
            }
        })
    };

    let commands = DeckCommands {
        swipe_left: trigger(SwipeDirection::Left),
        swipe_right: trigger(SwipeDirection::Right),
        rewind,
    };

    let pointer_down = {
        let engine = engine.clone();
        let drag_origin = drag_origin.clone();
        Callback::from(move |event: PointerEvent| {
            event.prevent_default();
            if drag_origin.deref().is_some() {
                return;
            }
            let ready = engine
                .deref()
                .as_ref()
                .map(|eng| matches!(eng.phase(), DeckPhase::Idle))
                .unwrap_or(false);
            if !ready {
                return;
            }
            if let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            {
                let _ = target.set_pointer_capture(event.pointer_id());
            }
            drag_origin.set(Some(DragOrigin {
                pointer_id: event.pointer_id(),
                start_x: event.client_x() as f64,
                start_y: event.client_y() as f64,
            }));
        })
    };

    let pointer_move = {
        let engine = engine.clone();
        let drag_origin = drag_origin.clone();
        let feedback = feedback.clone();
        Callback::from(move |event: PointerEvent| {
            let Some(origin) = drag_origin.deref().clone() else {
                return;
            };
            if origin.pointer_id != event.pointer_id() {
                return;
            }
            event.prevent_default();
            let Some(mut eng) = engine.deref().clone() else {
                return;
            };
            let dx = event.client_x() as f64 - origin.start_x;
            let dy = event.client_y() as f64 - origin.start_y;
            if eng.drag_move(dx, dy) {
                let (like, nope) = eng.feedback();
                feedback.dispatch(FeedbackAction::Drag { like, nope });
                engine.set(Some(eng));
            }
        })
    };

    let pointer_up = {
        let engine = engine.clone();
        let drag_origin = drag_origin.clone();
        let feedback = feedback.clone();
        Callback::from(move |event: PointerEvent| {
            let Some(origin) = drag_origin.deref().clone() else {
                return;
            };
            if origin.pointer_id != event.pointer_id() {
                return;
            }
            if let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            {
                let _ = target.release_pointer_capture(event.pointer_id());
            }
            drag_origin.set(None);
            let Some(mut eng) = engine.deref().clone() else {
                return;
            };
            match eng.release() {
                ReleaseOutcome::Commit(_) => {
                    let (like, nope) = eng.feedback();
                    feedback.dispatch(FeedbackAction::Drag { like, nope });
                }
                ReleaseOutcome::Settle | ReleaseOutcome::Rest => {
                    feedback.dispatch(FeedbackAction::Reset);
                }
            }
            engine.set(Some(eng));
        })
    };

    let pointer_cancel = {
        let engine = engine.clone();
        let drag_origin = drag_origin.clone();
        let feedback = feedback.clone();
        Callback::from(move |event: PointerEvent| {
            let Some(origin) = drag_origin.deref().clone() else {
                return;
            };
            if origin.pointer_id != event.pointer_id() {
                return;
            }
            if let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            {
                let _ = target.release_pointer_capture(event.pointer_id());
            }
            drag_origin.set(None);
            let Some(mut eng) = engine.deref().clone() else {
                return;
            };
            eng.cancel_drag();
            feedback.dispatch(FeedbackAction::Reset);
            engine.set(Some(eng));
        })
    };

    // The animating gate reopens only here: history append, likes update and
    // feedback reset all happen inside the completion event, in order.
    let transition_end = {
        let engine = engine.clone();
        let feedback = feedback.clone();
        let likes = likes.clone();
        Callback::from(move |event: TransitionEvent| {
            if event.property_name() != "transform" {
                return;
            }
            let Some(mut eng) = engine.deref().clone() else {
                return;
            };
            if !eng.is_animating() {
                return;
            }
            if let Some(commit) = eng.finish_animation() {
                log::debug!(
                    "committed {:?} on {}, index now {}",
                    commit.direction,
                    commit.profile.name,
                    commit.new_index
                );
                if commit.direction == SwipeDirection::Right {
                    likes.dispatch(LikesAction::Add(commit.profile));
                }
            }
            feedback.dispatch(FeedbackAction::Reset);
            engine.set(Some(eng));
        })
    };

    let body = match status.deref() {
        FetchStatus::Loading => html! {
            <p class="screen-note">{ "Finding people near you…" }</p>
        },
        FetchStatus::Error(message) => html! {
            <p class="screen-note error">{ message }</p>
        },
        // The engine is created by an effect, one render after the fetch
        // resolves.
        FetchStatus::Idle if engine.deref().is_none() => html! {
            <p class="screen-note">{ "Shuffling the deck…" }</p>
        },
        FetchStatus::Idle => {
            let Some(eng) = engine.deref().as_ref() else {
                return html! {};
            };
            let actions_disabled = eng.is_exhausted();
            let rewind_disabled = !eng.can_rewind();
            html! {
                <div class="deck-wrapper">
                    { render_progress_row(eng) }
                    { render_deck(
                        eng,
                        pointer_down,
                        pointer_move,
                        pointer_up,
                        pointer_cancel,
                        transition_end,
                    ) }
                    <ContextProvider<FeedbackHandle> context={feedback.clone()}>
                        <SwipeActions
                            commands={commands}
                            disabled={actions_disabled}
                            {rewind_disabled}
                        />
                    </ContextProvider<FeedbackHandle>>
                </div>
            }
        }
    };

    html! {
        <main class="home-screen">
            <header class="header">
                <span class="logo-mark">{ "♥" }</span>
                <span class="logo-text">{ "matchdeck" }</span>
            </header>
            { body }
        </main>
    }
}

fn render_progress_row(eng: &DeckEngine) -> Html {
    let active = eng.top_index();
    let done_below = eng.current_index();
    html! {
        <div class="progress-row">
            { for eng.profiles().iter().enumerate().map(|(index, profile)| {
                let class = classes!(
                    "progress-bar",
                    if Some(index) == active {
                        Some("progress-active")
                    } else if index < done_below {
                        Some("progress-done")
                    } else {
                        None
                    }
                );
                html! { <div key={profile.id.clone()} class={class}></div> }
            }) }
        </div>
    }
}

fn render_deck(
    eng: &DeckEngine,
    pointer_down: Callback<PointerEvent>,
    pointer_move: Callback<PointerEvent>,
    pointer_up: Callback<PointerEvent>,
    pointer_cancel: Callback<PointerEvent>,
    transition_end: Callback<TransitionEvent>,
) -> Html {
    let Some(top) = eng.top_profile() else {
        return html! {
            <div class="card-stack">
                <div class="card empty-card">
                    <p class="empty-text">{ EMPTY_DECK_LABEL }</p>
                </div>
            </div>
        };
    };

    let (dx, dy) = eng.drag_offset();
    let transition = match eng.phase() {
        DeckPhase::Dragging => "transform 0s".to_string(),
        DeckPhase::Animating(Animation::FlyOff(_)) => {
            format!("transform {}ms ease-in", deck::FLY_OFF_MS)
        }
        _ => format!("transform {}ms ease", deck::SETTLE_MS),
    };
    let top_style = format!(
        "transform: translate({dx:.1}px, {dy:.1}px) rotate({:.2}deg); transition: {transition};",
        eng.rotation_deg()
    );

    let preview = eng.preview_profile().map(|profile| {
        let style = format!(
            "transform: scale({}) translateY({}px);",
            deck::PREVIEW_SCALE,
            deck::PREVIEW_OFFSET_PX
        );
        html! {
            <div key={profile.id.clone()} class="card preview-card" style={style}>
                { render_card(profile, None) }
            </div>
        }
    });

    html! {
        <div class="card-stack">
            { for preview }
            <div
                key={top.id.clone()}
                class="card top-card"
                style={top_style}
                onpointerdown={pointer_down}
                onpointermove={pointer_move}
                onpointerup={pointer_up}
                onpointercancel={pointer_cancel}
                ontransitionend={transition_end}
            >
                { render_card(top, Some(eng.feedback())) }
            </div>
        </div>
    }
}

/// Pure card body: background image, scrim, profile info and, on the top
/// card only, the LIKE/NOPE badges driven by the feedback signals.
fn render_card(profile: &Profile, badges: Option<(f64, f64)>) -> Html {
    let image_style = format!("background-image: url('{}');", profile.image);
    let badge_markup = badges.map(|(like, nope)| {
        html! {
            <>
                <span class="badge like-badge" style={format!("opacity: {like:.3};")}>
                    { "LIKE" }
                </span>
                <span class="badge nope-badge" style={format!("opacity: {nope:.3};")}>
                    { "NOPE" }
                </span>
            </>
        }
    });

    html! {
        <div class="card-image" style={image_style}>
            <div class="card-scrim"></div>
            { for badge_markup }
            <div class="profile-info">
                {
                    if let Some(status) = &profile.status {
                        html! { <span class="status-pill">{ status }</span> }
                    } else {
                        html! {}
                    }
                }
                <p class="profile-name">
                    { &profile.name }
                    <span class="profile-age">{ format!(" {}", profile.age) }</span>
                </p>
                <p class="profile-distance">
                    <span class="distance-marker">{ "◦" }</span>
                    { &profile.distance_label }
                </p>
                {
                    if let Some(bio) = &profile.bio {
                        html! { <p class="profile-bio">{ bio }</p> }
                    } else {
                        html! {}
                    }
                }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SwipeActionsProps {
    commands: DeckCommands,
    #[prop_or_default]
    disabled: bool,
    #[prop_or_default]
    rewind_disabled: bool,
}

/// Action bar beneath the deck. Button colors blend toward their accent as
/// the matching swipe progresses; each button fades while the opposing
/// progress rises.
#[function_component(SwipeActions)]
fn swipe_actions(props: &SwipeActionsProps) -> Html {
    let feedback = use_context::<FeedbackHandle>()
        .map(|handle| *handle)
        .unwrap_or_default();

    let like_bg = WHITE.mix(LIKE_ACCENT, feedback.like_progress);
    let like_icon = LIKE_ACCENT.mix(WHITE, feedback.like_progress);
    let nope_bg = WHITE.mix(NOPE_ACCENT, feedback.nope_progress);
    let nope_icon = NOPE_ACCENT.mix(WHITE, feedback.nope_progress);

    html! {
        <div class="swipe-actions">
            <IconButton
                glyph="↺"
                color={NEUTRAL_ICON.to_css()}
                background={WHITE.to_css()}
                disabled={props.rewind_disabled}
                onclick={props.commands.rewind.clone()}
                class={classes!("rewind-button")}
            />
            <IconButton
                glyph="✕"
                color={nope_icon.to_css()}
                background={nope_bg.to_css()}
                visible_opacity={1.0 - feedback.like_progress}
                disabled={props.disabled}
                onclick={props.commands.swipe_left.clone()}
            />
            <IconButton
                glyph="♥"
                color={like_icon.to_css()}
                background={like_bg.to_css()}
                visible_opacity={1.0 - feedback.nope_progress}
                disabled={props.disabled}
                onclick={props.commands.swipe_right.clone()}
            />
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct IconButtonProps {
    glyph: AttrValue,
    color: AttrValue,
    background: AttrValue,
    #[prop_or(1.0)]
    visible_opacity: f64,
    #[prop_or_default]
    disabled: bool,
    onclick: Callback<()>,
    #[prop_or_default]
    class: Classes,
}

#[function_component(IconButton)]
fn icon_button(props: &IconButtonProps) -> Html {
    let base_opacity = if props.disabled { 0.45 } else { 1.0 };
    let style = format!(
        "background-color: {}; color: {}; opacity: {:.3};",
        props.background,
        props.color,
        base_opacity * props.visible_opacity.clamp(0.0, 1.0)
    );
    let onclick = {
        let onclick = props.onclick.clone();
        Callback::from(move |_: MouseEvent| onclick.emit(()))
    };

    html! {
        <button
            class={classes!("icon-button", props.class.clone())}
            {style}
            disabled={props.disabled}
            {onclick}
        >
            { props.glyph.to_string() }
        </button>
    }
}

#[function_component(LikesScreen)]
fn likes_screen() -> Html {
    let likes = use_context::<LikesHandle>();
    let Some(likes) = likes else {
        return html! {};
    };

    let clear_all = {
        let likes = likes.clone();
        Callback::from(move |_: MouseEvent| likes.dispatch(LikesAction::Clear))
    };

    let rows = if likes.is_empty() {
        html! {
            <p class="screen-note">{ "No likes yet — swipe right on someone." }</p>
        }
    } else {
        html! {
            <ul class="likes-list">
                { for likes.likes.iter().map(|profile| render_like_row(profile, &likes)) }
            </ul>
        }
    };

    html! {
        <main class="likes-screen">
            <header class="header">
                <span class="logo-text">{ "Likes" }</span>
                {
                    if likes.is_empty() {
                        html! {}
                    } else {
                        html! {
                            <button class="clear-button" onclick={clear_all}>
                                { "Clear all" }
                            </button>
                        }
                    }
                }
            </header>
            <p class="subtitle">{ "People you have already liked." }</p>
            { rows }
        </main>
    }
}

fn render_like_row(profile: &Profile, likes: &LikesHandle) -> Html {
    let remove = {
        let likes = likes.clone();
        let id = profile.id.clone();
        Callback::from(move |_: MouseEvent| likes.dispatch(LikesAction::Remove(id.clone())))
    };
    let avatar_style = format!("background-image: url('{}');", profile.image);

    html! {
        <li key={profile.id.clone()} class="like-row">
            <div class="like-avatar" style={avatar_style}></div>
            <div class="like-details">
                <p class="like-name">{ format!("{} {}", profile.name, profile.age) }</p>
                <p class="like-meta">{ &profile.distance_label }</p>
                {
                    if let Some(status) = &profile.status {
                        html! { <span class="status-pill">{ status }</span> }
                    } else {
                        html! {}
                    }
                }
            </div>
            <button class="remove-button" onclick={remove}>{ "✕" }</button>
        </li>
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
