use ug_engine::{Engine, Game};

/// Le strict minimum : une ligne de texte et un `@`.
pub struct Hello;

impl Game for Hello {
    fn render(&mut self, engine: &mut Engine) {
        if let Ok(root) = engine.root_mut() {
            root.put_string(10, 5, "Hello, unicodegame!", (0, 255, 0), None);
            root.put(10, 7, '@', (255, 255, 0), None);
        }
    }
}
