//! UI strings.

/// A translatable UI string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Label {
    Acknowledgements,
    Breadcrumbs,
    Children,
    Related,
    OtherLanguages,
    OnThisPage,
    Tool,
    Resource,
    Tag,
    Guide,
    TagId,
    ParentTag,
    CreatedFrom,
    UsedToCreate,
    UsedInWorkflows,
    Unresolved,
}

impl Label {
    /// Text for `lang`, falling back to English.
    #[must_use]
    pub fn text(self, lang: &str) -> &'static str {
        match lang {
            "es" => self.spanish(),
            _ => self.english(),
        }
    }

    fn english(self) -> &'static str {
        match self {
            Self::Acknowledgements => "Acknowledgements",
            Self::Breadcrumbs => "Breadcrumbs",
            Self::Children => "Pages in this section",
            Self::Related => "Related pages",
            Self::OtherLanguages => "Other languages",
            Self::OnThisPage => "On this page",
            Self::Tool => "Tool",
            Self::Resource => "Resource",
            Self::Tag => "Tag",
            Self::Guide => "Guide",
            Self::TagId => "Tag ID",
            Self::ParentTag => "Parent tag",
            Self::CreatedFrom => "Created from",
            Self::UsedToCreate => "Used to create",
            Self::UsedInWorkflows => "Used in workflows",
            Self::Unresolved => "[Unresolved]",
        }
    }

    fn spanish(self) -> &'static str {
        match self {
            Self::Acknowledgements => "Agradecimientos",
            Self::Breadcrumbs => "Ruta de navegación",
            Self::Children => "Páginas en esta sección",
            Self::Related => "Páginas relacionadas",
            Self::OtherLanguages => "Otros idiomas",
            Self::OnThisPage => "En esta página",
            Self::Tool => "Herramienta",
            Self::Resource => "Recurso",
            Self::Tag => "Etiqueta",
            Self::Guide => "Guía",
            Self::TagId => "ID de etiqueta",
            Self::ParentTag => "Etiqueta padre",
            Self::CreatedFrom => "Creado a partir de",
            Self::UsedToCreate => "Se usa para crear",
            Self::UsedInWorkflows => "Se usa en flujos de trabajo",
            Self::Unresolved => "[Sin resolver]",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_fallback() {
        assert_eq!(Label::Acknowledgements.text("en"), "Acknowledgements");
        assert_eq!(Label::Acknowledgements.text("es"), "Agradecimientos");
        assert_eq!(Label::Tag.text("fr"), "Tag");
    }
}
