mod character;
mod config;
mod demo;
#[cfg(feature = "dev-tools")]
mod dev;

use bevy::prelude::*;

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Ledgewalker".to_string(),
            resolution: (1280.0, 720.0).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins((
        config::ConfigPlugin,
        character::CharacterPlugin,
        demo::DemoPlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(dev::DevPlugin);

    app.run();
}
