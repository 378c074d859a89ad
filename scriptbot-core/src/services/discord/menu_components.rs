// File: scriptbot-core/src/services/discord/menu_components.rs

use twilight_model::channel::message::component::{
    ActionRow, Component, SelectMenu, SelectMenuOption, SelectMenuType,
};
use twilight_model::channel::message::{Embed, EmojiReactionType};
use twilight_model::id::Id;
use twilight_util::builder::embed::{EmbedBuilder, EmbedFooterBuilder, ImageSource};

use scriptbot_common::models::menu::{MenuOption, MenuView};

use crate::Error;

/// Custom ID of the script select menu.
pub const MENU_CUSTOM_ID: &str = "script_menu";

/// Discord caps a select menu at 25 options.
pub const MAX_SELECT_OPTIONS: usize = 25;
/// Max length of an option label or description.
pub const MAX_OPTION_TEXT: usize = 100;

pub fn menu_embed(view: &MenuView) -> Result<Embed, Error> {
    let mut builder = EmbedBuilder::new()
        .title(view.title.as_str())
        .description(view.description.as_str())
        .color(view.color)
        .footer(EmbedFooterBuilder::new(view.footer.as_str()));

    if let Some(url) = &view.image_url {
        let image = ImageSource::url(url.as_str())
            .map_err(|e| Error::Platform(format!("Invalid menu image url '{url}': {e}")))?;
        builder = builder.image(image);
    }

    let embed = builder
        .validate()
        .map_err(|e| Error::Platform(format!("Invalid menu embed: {e}")))?
        .build();
    Ok(embed)
}

/// One action row holding the select menu, or nothing when there are no
/// options (Discord rejects an empty select).
pub fn menu_components(view: &MenuView) -> Vec<Component> {
    if !view.has_options() {
        return Vec::new();
    }

    let options = view
        .options
        .iter()
        .take(MAX_SELECT_OPTIONS)
        .map(select_option)
        .collect();

    vec![Component::ActionRow(ActionRow {
        components: vec![Component::SelectMenu(SelectMenu {
            channel_types: None,
            custom_id: MENU_CUSTOM_ID.to_string(),
            default_values: None,
            disabled: false,
            kind: SelectMenuType::Text,
            max_values: Some(1),
            min_values: Some(1),
            options: Some(options),
            placeholder: Some(truncate(&view.placeholder, MAX_OPTION_TEXT)),
        })],
    })]
}

fn select_option(option: &MenuOption) -> SelectMenuOption {
    let description = (!option.description.is_empty())
        .then(|| truncate(&option.description, MAX_OPTION_TEXT));
    let emoji = Id::new_checked(option.icon.id).map(|id| EmojiReactionType::Custom {
        animated: false,
        id,
        name: Some(option.icon.name.to_string()),
    });

    SelectMenuOption {
        default: false,
        description,
        emoji,
        label: truncate(&option.label, MAX_OPTION_TEXT),
        value: option.value.clone(),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::menu::MenuRenderer;

    fn entries(n: usize) -> Vec<(String, String)> {
        (0..n).map(|i| (format!("s{i}"), format!("desc {i}"))).collect()
    }

    #[test]
    fn empty_menu_has_no_components() {
        let view = MenuRenderer::default().render(&[]);
        assert!(menu_components(&view).is_empty());
        let embed = menu_embed(&view).unwrap();
        assert_eq!(embed.title.as_deref(), Some("Scripts Disponibles"));
    }

    #[test]
    fn select_menu_carries_every_option() {
        let view = MenuRenderer::default().render(&entries(3));
        let components = menu_components(&view);
        assert_eq!(components.len(), 1);

        let Component::ActionRow(row) = &components[0] else {
            panic!("expected an action row");
        };
        let Component::SelectMenu(menu) = &row.components[0] else {
            panic!("expected a select menu");
        };
        assert_eq!(menu.custom_id, MENU_CUSTOM_ID);
        let options = menu.options.as_ref().unwrap();
        let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["s0", "s1", "s2"]);
        assert_eq!(options[1].description.as_deref(), Some("desc 1"));
        assert!(options[0].emoji.is_some());
    }

    #[test]
    fn long_menus_are_capped() {
        let view = MenuRenderer::default().render(&entries(40));
        let components = menu_components(&view);
        let Component::ActionRow(row) = &components[0] else {
            panic!("expected an action row");
        };
        let Component::SelectMenu(menu) = &row.components[0] else {
            panic!("expected a select menu");
        };
        assert_eq!(menu.options.as_ref().unwrap().len(), MAX_SELECT_OPTIONS);
    }

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("short", 10), "short");
        let long = "é".repeat(120);
        let cut = truncate(&long, MAX_OPTION_TEXT);
        assert_eq!(cut.chars().count(), MAX_OPTION_TEXT);
        assert!(cut.ends_with('…'));
    }
}
