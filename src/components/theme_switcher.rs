//! Developer-only panel for trying colour and typography presets live.

use log::info;
use stylist::yew::styled_component;
use yew::prelude::*;
use yew_hooks::use_bool_toggle;

use crate::dom;
use crate::error::SiteError;
use crate::theme::{RootStyle, FONTS, THEMES};

pub const MOUNT_ID: &str = "theme-switcher";

#[derive(Properties, PartialEq)]
pub struct ThemeSwitcherProps {
    pub root_style: RootStyle,
}

#[styled_component]
pub fn ThemeSwitcher(props: &ThemeSwitcherProps) -> Html {
    let open = use_bool_toggle(false);
    let theme = use_state(|| THEMES[0].id);
    let font = use_state(|| FONTS[0].id);

    let toggle = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.toggle())
    };

    let option = css!(
        r#"
        display: block;
        width: 100%;
        padding: 8px;
        margin-bottom: 5px;
        background: rgba(255, 255, 255, 0.1);
        border: 1px solid transparent;
        color: #fff;
        cursor: pointer;
        text-align: left;
        transition: all 0.2s;

        &:hover {
            background: rgba(255, 255, 255, 0.2);
        }

        &.selected {
            border-color: rgba(255, 255, 255, 0.4);
        }
        "#
    );
    let heading = css!(
        r#"
        margin: 0 0 10px 0;
        font-size: 14px;
        text-transform: uppercase;
        letter-spacing: 1px;

        &.spaced {
            margin-top: 20px;
        }
        "#
    );

    let theme_buttons = THEMES.iter().map(|preset| {
        let root_style = props.root_style.clone();
        let selected = theme.clone();
        let onclick = Callback::from(move |_: MouseEvent| {
            root_style.apply_theme(preset);
            selected.set(preset.id);
        });
        html! {
            <button
                key={preset.id}
                class={classes!(option.clone(), (*theme == preset.id).then_some("selected"))}
                {onclick}
            >
                {preset.name}
            </button>
        }
    });

    let font_buttons = FONTS.iter().map(|preset| {
        let root_style = props.root_style.clone();
        let selected = font.clone();
        let onclick = Callback::from(move |_: MouseEvent| {
            root_style.apply_font(preset);
            selected.set(preset.id);
        });
        html! {
            <button
                key={preset.id}
                class={classes!(option.clone(), (*font == preset.id).then_some("selected"))}
                {onclick}
            >
                {preset.name}
            </button>
        }
    });

    let panel_transform = if *open {
        "transform: translateY(0);"
    } else {
        "transform: translateY(calc(100% + 20px));"
    };

    html! {
        <>
            <button
                class={css!(r#"
                    position: fixed;
                    bottom: 20px;
                    right: 20px;
                    z-index: 100000;
                    padding: 10px 20px;
                    background: #fff;
                    color: #000;
                    border: none;
                    border-radius: 50px;
                    cursor: pointer;
                    font-weight: bold;
                    box-shadow: 0 4px 10px rgba(0, 0, 0, 0.3);
                "#)}
                onclick={toggle}
            >
                {"🎨 Themes"}
            </button>
            <div
                class={css!(r#"
                    position: fixed;
                    bottom: 20px;
                    right: 20px;
                    background: rgba(0, 0, 0, 0.8);
                    backdrop-filter: blur(10px);
                    padding: 20px;
                    border: 1px solid rgba(255, 255, 255, 0.2);
                    border-radius: 10px;
                    z-index: 99999;
                    color: #fff;
                    font-family: sans-serif;
                    width: 250px;
                    transition: transform 0.3s ease;
                "#)}
                style={panel_transform}
            >
                <h3 class={heading.clone()}>{"Color Theme"}</h3>
                { for theme_buttons }
                <h3 class={classes!(heading.clone(), "spaced")}>{"Typography"}</h3>
                { for font_buttons }
            </div>
        </>
    }
}

/// Appends a host element to `body` and renders the switcher into it.
pub fn mount(root_style: RootStyle) -> Result<(), SiteError> {
    let document = dom::document()?;
    let body = document.body().ok_or(SiteError::MissingElement("body"))?;
    let host = document.create_element("div")?;
    host.set_id(MOUNT_ID);
    body.append_child(&host)?;

    yew::Renderer::<ThemeSwitcher>::with_root_and_props(host, ThemeSwitcherProps { root_style }).render();
    info!("Theme switcher mounted");
    Ok(())
}
