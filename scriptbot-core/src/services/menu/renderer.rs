use scriptbot_common::models::menu::{MenuIcon, MenuOption, MenuView};

/// Custom emoji cycled through the menu options, in order.
pub const DEFAULT_ICONS: [MenuIcon; 8] = [
    MenuIcon { name: "1000114091", id: 1441900967241973901 },
    MenuIcon { name: "1000114072", id: 1441930629553066044 },
    MenuIcon { name: "1000114090", id: 1441930773195132938 },
    MenuIcon { name: "1000114783", id: 1441930880342949958 },
    MenuIcon { name: "1000114071", id: 1441930971195637841 },
    MenuIcon { name: "1000114788", id: 1443423856437235863 },
    MenuIcon { name: "1000114073", id: 1443423899726647296 },
    MenuIcon { name: "1000114076", id: 1443423959159672883 },
];

/// Static text around the options.
#[derive(Debug, Clone)]
pub struct MenuStyle {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub footer: String,
    pub color: u32,
    pub placeholder: String,
}

impl Default for MenuStyle {
    fn default() -> Self {
        Self {
            title: "Scripts Disponibles".to_string(),
            description: "🇪🇸Selecciona el script\n🇺🇸Select the script".to_string(),
            image_url: Some(
                "https://cdn.discordapp.com/attachments/1398867717871767582/1441978459852378175/standard_3.gif"
                    .to_string(),
            ),
            footer: "V1.02 | Script Bot".to_string(),
            color: 0xE74C3C,
            placeholder: "Selecciona un script...".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MenuRenderer {
    style: MenuStyle,
    icons: Vec<MenuIcon>,
}

impl Default for MenuRenderer {
    fn default() -> Self {
        Self::new(MenuStyle::default(), DEFAULT_ICONS.to_vec())
    }
}

impl MenuRenderer {
    /// An empty icon list falls back to `DEFAULT_ICONS`.
    pub fn new(style: MenuStyle, icons: Vec<MenuIcon>) -> Self {
        let icons = if icons.is_empty() { DEFAULT_ICONS.to_vec() } else { icons };
        Self { style, icons }
    }

    pub fn style(&self) -> &MenuStyle {
        &self.style
    }

    /// Builds the view for a guild's `(name, description)` entries.
    ///
    /// No entries => a view with no options, not an error.
    pub fn render(&self, entries: &[(String, String)]) -> MenuView {
        let options = entries
            .iter()
            .enumerate()
            .map(|(i, (name, desc))| MenuOption {
                label: name.clone(),
                description: desc.clone(),
                value: name.clone(),
                icon: self.icons[i % self.icons.len()],
            })
            .collect();

        MenuView {
            title: self.style.title.clone(),
            description: self.style.description.clone(),
            image_url: self.style.image_url.clone(),
            footer: self.style.footer.clone(),
            color: self.style.color,
            placeholder: self.style.placeholder.clone(),
            options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(n: usize) -> Vec<(String, String)> {
        (0..n).map(|i| (format!("s{i}"), format!("desc {i}"))).collect()
    }

    #[test]
    fn empty_entries_render_an_empty_menu() {
        let view = MenuRenderer::default().render(&[]);
        assert!(!view.has_options());
        assert_eq!(view.title, "Scripts Disponibles");
        assert_eq!(view.footer, "V1.02 | Script Bot");
    }

    #[test]
    fn options_keep_input_order() {
        let view = MenuRenderer::default().render(&entries(3));
        assert_eq!(view.labels(), vec!["s0", "s1", "s2"]);
        assert_eq!(view.options[1].description, "desc 1");
        assert_eq!(view.options[2].value, "s2");
    }

    #[test]
    fn icons_wrap_around_the_icon_set() {
        let view = MenuRenderer::default().render(&entries(10));
        assert_eq!(view.options[0].icon, DEFAULT_ICONS[0]);
        assert_eq!(view.options[7].icon, DEFAULT_ICONS[7]);
        assert_eq!(view.options[8].icon, DEFAULT_ICONS[0]);
        assert_eq!(view.options[9].icon, DEFAULT_ICONS[1]);
    }

    #[test]
    fn custom_icon_set() {
        let icons = vec![
            MenuIcon { name: "a", id: 1 },
            MenuIcon { name: "b", id: 2 },
        ];
        let view = MenuRenderer::new(MenuStyle::default(), icons).render(&entries(3));
        let ids: Vec<u64> = view.options.iter().map(|o| o.icon.id).collect();
        assert_eq!(ids, vec![1, 2, 1]);

        let fallback = MenuRenderer::new(MenuStyle::default(), Vec::new()).render(&entries(1));
        assert_eq!(fallback.options[0].icon, DEFAULT_ICONS[0]);
    }
}
