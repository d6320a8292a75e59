//! Template types for typed variable injection.

use std::marker::PhantomData;

/// Trait for template variable sets
pub trait TemplateVars {
    fn apply(&self, content: &str) -> String;
}

/// Template with typed variable injection
#[derive(Debug, Clone, Copy)]
pub struct Template<V> {
    content: &'static str,
    _marker: PhantomData<V>,
}

impl<V> Template<V> {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content,
            _marker: PhantomData,
        }
    }
}

impl<V: TemplateVars> Template<V> {
    pub fn render(&self, vars: &V) -> String {
        vars.apply(self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Greeting<'a>(&'a str);

    impl TemplateVars for Greeting<'_> {
        fn apply(&self, content: &str) -> String {
            content.replace("__WHO__", self.0)
        }
    }

    #[test]
    fn test_render_replaces_every_marker() {
        const T: Template<Greeting<'static>> = Template::new("hi __WHO__, bye __WHO__");
        assert_eq!(T.render(&Greeting("ui")), "hi ui, bye ui");
    }
}
