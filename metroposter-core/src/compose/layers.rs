/// One of the four drawable poster layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    /// Classified road network.
    Roads,
    /// Water polygons.
    Water,
    /// Park polygons.
    Parks,
    /// Transit lines.
    Subway,
}

impl Layer {
    /// The request token naming this layer.
    pub fn token(self) -> &'static str {
        match self {
            Layer::Roads => "roads",
            Layer::Water => "water",
            Layer::Parks => "parks",
            Layer::Subway => "subway",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "roads" => Some(Layer::Roads),
            "water" => Some(Layer::Water),
            "parks" => Some(Layer::Parks),
            "subway" => Some(Layer::Subway),
            _ => None,
        }
    }
}

/// An ordered, de-duplicated set of requested layers.
///
/// An empty selection is valid and produces a poster with only the gradient
/// and typography overlay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerSelection {
    layers: Vec<Layer>,
}

impl LayerSelection {
    /// The selection used when the caller names no layers.
    pub fn default_set() -> Self {
        Self {
            layers: vec![Layer::Roads, Layer::Water, Layer::Parks],
        }
    }

    /// Parse a comma-separated layer list.
    ///
    /// First-occurrence order is preserved, duplicates are removed, unknown
    /// tokens are dropped silently, and an absent or blank argument yields
    /// the default selection.
    pub fn parse(arg: Option<&str>) -> Self {
        let Some(arg) = arg.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::default_set();
        };

        let mut layers = Vec::new();
        for token in arg.split(',') {
            let token = token.trim().to_ascii_lowercase();
            if let Some(layer) = Layer::from_token(&token)
                && !layers.contains(&layer)
            {
                layers.push(layer);
            }
        }
        Self { layers }
    }

    /// Whether `layer` was requested.
    pub fn contains(&self, layer: Layer) -> bool {
        self.layers.contains(&layer)
    }

    /// Whether no layers were requested.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layers in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = Layer> + '_ {
        self.layers.iter().copied()
    }

    /// Tokens in selection order, for log lines.
    pub fn tokens(&self) -> Vec<&'static str> {
        self.layers.iter().map(|l| l.token()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_preserves_order_dedups_and_drops_unknown() {
        let sel = LayerSelection::parse(Some("roads,water,roads,bogus"));
        assert_eq!(sel.tokens(), ["roads", "water"]);
    }

    #[test]
    fn absent_or_blank_argument_yields_default_set() {
        assert_eq!(LayerSelection::parse(None), LayerSelection::default_set());
        assert_eq!(
            LayerSelection::parse(Some("   ")),
            LayerSelection::default_set()
        );
    }

    #[test]
    fn all_unknown_tokens_yield_a_valid_empty_selection() {
        let sel = LayerSelection::parse(Some("bogus,nope"));
        assert!(sel.is_empty());
        assert!(!sel.contains(Layer::Roads));
    }

    #[test]
    fn tokens_are_case_and_whitespace_insensitive() {
        let sel = LayerSelection::parse(Some(" Subway , PARKS "));
        assert_eq!(sel.tokens(), ["subway", "parks"]);
    }
}
