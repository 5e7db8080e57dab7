use std::path::PathBuf;

use engine::{
    draw_text, text_width_px, Camera, Canvas, InputAction, InputSnapshot, Scene, SceneCommand,
    Vec2, Viewport,
};
use tracing::{debug, info, warn};

use super::config::{
    player_spawn, PICKUP_RADIUS, SCREEN_HEIGHT, SCREEN_WIDTH, WORLD_HEIGHT, WORLD_WIDTH,
};
use super::effects::{apply_heat_haze, apply_night, light_radius, DayClock};
use super::hud::{draw_hud, HudView};
use super::menu::Menu;
use super::player::{clamp_speed_index, Player};
use super::portals::{place_portals, Portal, PortalKind};
use super::save::{
    read_save, write_save, SaveGame, SavedPlayer, SavedPortals, SavedWorld, SavedWorlds,
};
use super::settings::Settings;
use super::world::World;
use super::worldgen::{Biome, WorldRng};

const PORTAL_STREAM_OFFSET: u64 = 2;
const NOTICE_SECONDS: f32 = 2.0;
const MENU_BACKDROP_COLOR: [u8; 4] = [190, 160, 110, 255];
const BANNER_COLOR: [u8; 4] = [0, 0, 0, 160];
const BANNER_TEXT_COLOR: [u8; 4] = [250, 240, 220, 255];
const NOTICE_COLOR: [u8; 4] = [255, 230, 160, 255];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GameState {
    MainMenu,
    Running,
    Paused,
    Settings(SettingsReturn),
    Victory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsReturn {
    MainMenu,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainChoice {
    NewGame,
    Load,
    Settings,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PauseChoice {
    Resume,
    Save,
    Settings,
    QuitToMenu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsChoice {
    Speed,
    Fullscreen,
    HeatHaze,
    NightLevel,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickOutcome {
    Continue,
    Victory,
}

/// Everything that exists only while a game is in progress.
#[derive(Debug)]
struct PlayState {
    desert: World,
    forest: World,
    current: Biome,
    player: Player,
    spawn: Vec2,
    true_portal: Portal,
    trap_portal: Portal,
    camera: Camera,
    clock: DayClock,
}

impl PlayState {
    fn new_game(seed: u64, speed_index: usize) -> Self {
        let spawn = player_spawn();
        let desert = World::generate(seed, Biome::Desert);
        let forest = World::generate(seed, Biome::Forest);
        let mut portal_rng = WorldRng::from_seed(seed.wrapping_add(PORTAL_STREAM_OFFSET));
        let (true_portal, trap_portal) = place_portals(&mut portal_rng, spawn);
        let start = desert.free_position_near(spawn, spawn);
        info!(
            seed,
            true_x = true_portal.pos.x,
            true_y = true_portal.pos.y,
            "new_game_started"
        );

        let mut play = Self {
            desert,
            forest,
            current: Biome::Desert,
            player: Player::new(start, speed_index),
            spawn,
            true_portal,
            trap_portal,
            camera: Camera::new(WORLD_WIDTH, WORLD_HEIGHT),
            clock: DayClock::default(),
        };
        play.update_camera(default_viewport());
        play
    }

    fn from_save(save: SaveGame) -> Self {
        let spawn = player_spawn();
        let SavedWorlds { desert, forest } = save.worlds;
        let desert = load_world_slot(desert, Biome::Desert);
        let forest = load_world_slot(forest, Biome::Forest);
        let current = Biome::parse(&save.current_biome).unwrap_or_else(|| {
            warn!(biome = %save.current_biome, "saved_current_biome_unknown");
            Biome::Desert
        });

        let mut portal_rng =
            WorldRng::from_seed(desert.seed().wrapping_add(PORTAL_STREAM_OFFSET));
        let (placed_true, placed_trap) = place_portals(&mut portal_rng, spawn);
        let SavedPortals { true_portal, fake } = save.portals;
        let true_portal =
            restore_portal(&mut portal_rng, true_portal, PortalKind::True, placed_true);
        let trap_portal = restore_portal(&mut portal_rng, fake, PortalKind::Trap, placed_trap);

        let SavedPlayer {
            pos: [x, y],
            speed_index,
            inventory,
        } = save.player;
        let pos = if x.is_finite() && y.is_finite() {
            Vec2::new(x, y)
        } else {
            warn!("saved_player_position_invalid");
            spawn
        };
        let mut player = Player::new(pos, clamp_speed_index(speed_index));
        player.inventory = inventory;

        let mut play = Self {
            desert,
            forest,
            current,
            player,
            spawn,
            true_portal,
            trap_portal,
            camera: Camera::new(WORLD_WIDTH, WORLD_HEIGHT),
            clock: DayClock::from_elapsed(save.day_time),
        };
        play.update_camera(default_viewport());
        play
    }

    fn to_save(&self, settings: Settings) -> SaveGame {
        SaveGame {
            player: SavedPlayer {
                pos: [self.player.pos.x, self.player.pos.y],
                speed_index: self.player.speed_index,
                inventory: self.player.inventory,
            },
            worlds: SavedWorlds {
                desert: Some(self.desert.to_saved()),
                forest: Some(self.forest.to_saved()),
            },
            current_biome: self.current.as_str().to_string(),
            portals: SavedPortals {
                true_portal: Some([self.true_portal.pos.x, self.true_portal.pos.y]),
                fake: Some([self.trap_portal.pos.x, self.trap_portal.pos.y]),
            },
            settings,
            day_time: self.clock.elapsed(),
            ..SaveGame::default()
        }
    }

    fn world(&self) -> &World {
        match self.current {
            Biome::Desert => &self.desert,
            Biome::Forest => &self.forest,
        }
    }

    fn tick(&mut self, dt: f32, input: &InputSnapshot) -> TickOutcome {
        let world = match self.current {
            Biome::Desert => &mut self.desert,
            Biome::Forest => &mut self.forest,
        };
        self.player.update(dt, input, world.rocks(), world.bounds());
        if let Some(pickup) = world.remove_pickup_at(self.player.pos, PICKUP_RADIUS) {
            info!(
                kind = pickup.kind.as_str(),
                remaining = world.pickups().len(),
                "pickup_collected"
            );
            self.player.collect(pickup);
        }
        self.clock.advance(dt);
        self.update_camera(viewport_from_input(input));

        let body = self.player.rect();
        if self.true_portal.collides_with(body) {
            info!("true_portal_reached");
            return TickOutcome::Victory;
        }
        if self.trap_portal.collides_with(body) {
            info!("trap_portal_triggered");
            self.player.pos = self.world().free_position_near(self.spawn, self.spawn);
            self.update_camera(viewport_from_input(input));
        }
        TickOutcome::Continue
    }

    fn switch_biome(&mut self) {
        self.current = self.current.other();
        let world = self.world();
        let pos = world.free_position_near(self.player.pos, self.spawn);
        if pos != self.player.pos {
            debug!(
                from_x = self.player.pos.x,
                from_y = self.player.pos.y,
                to_x = pos.x,
                to_y = pos.y,
                "player_relocated"
            );
        }
        self.player.pos = pos;
        info!(biome = self.current.as_str(), "biome_switched");
    }

    fn update_camera(&mut self, viewport: Viewport) {
        self.camera.update(self.player.pos, viewport);
    }

    fn draw(&self, canvas: &mut Canvas<'_>, settings: &Settings, time_seconds: f32) {
        let world = self.world();
        world.draw(canvas, &self.camera);
        self.true_portal.draw(canvas, &self.camera, time_seconds);
        self.trap_portal.draw(canvas, &self.camera, time_seconds);
        self.player.draw(canvas, &self.camera);

        if world.biome() == Biome::Desert && settings.heat_haze {
            apply_heat_haze(canvas, time_seconds);
        }
        apply_night(
            canvas,
            self.camera.world_to_screen(self.player.pos),
            light_radius(&self.player.inventory),
            self.clock.darkness(settings.night_strength()),
        );

        draw_hud(
            canvas,
            &HudView {
                player: &self.player,
                true_portal: Some(self.true_portal.pos),
                biome: self.current,
                night_factor: self.clock.night_factor(),
                time_seconds,
            },
        );
    }
}

/// Rebuilds a saved portal, keeping the freshly placed one when the saved
/// entry is missing or not a finite position.
fn restore_portal(
    rng: &mut WorldRng,
    saved: Option<[f32; 2]>,
    kind: PortalKind,
    placed: Portal,
) -> Portal {
    match saved {
        Some([x, y]) if x.is_finite() && y.is_finite() => Portal::new(rng, Vec2::new(x, y), kind),
        Some(_) => {
            warn!(kind = ?kind, "saved_portal_position_invalid");
            placed
        }
        None => placed,
    }
}

fn load_world_slot(saved: Option<SavedWorld>, slot: Biome) -> World {
    match saved {
        Some(saved) => World::from_saved(saved),
        None => {
            let seed = rand::random::<u64>();
            warn!(slot = slot.as_str(), seed, "saved_world_missing_regenerating");
            World::generate(seed, slot)
        }
    }
}

fn default_viewport() -> Viewport {
    Viewport {
        width: SCREEN_WIDTH,
        height: SCREEN_HEIGHT,
    }
}

fn viewport_from_input(input: &InputSnapshot) -> Viewport {
    match input.window_size() {
        (0, _) | (_, 0) => default_viewport(),
        (width, height) => Viewport { width, height },
    }
}

#[derive(Debug, Clone)]
struct Notice {
    text: String,
    remaining: f32,
}

/// Top-level scene: menus, the running game and persistence.
pub(crate) struct GameSession {
    save_path: PathBuf,
    seed_override: Option<u64>,
    settings: Settings,
    state: GameState,
    play: Option<PlayState>,
    main_menu: Menu<MainChoice>,
    pause_menu: Menu<PauseChoice>,
    settings_menu: Menu<SettingsChoice>,
    notice: Option<Notice>,
    time_seconds: f32,
}

impl GameSession {
    pub(crate) fn new(save_path: PathBuf, seed_override: Option<u64>) -> Self {
        let settings = Settings::default();
        Self {
            save_path,
            seed_override,
            settings,
            state: GameState::MainMenu,
            play: None,
            main_menu: Menu::new(
                "DESERT PORTALS",
                vec![
                    (MainChoice::NewGame, "NEW GAME".to_string()),
                    (MainChoice::Load, "LOAD".to_string()),
                    (MainChoice::Settings, "SETTINGS".to_string()),
                    (MainChoice::Quit, "QUIT".to_string()),
                ],
            ),
            pause_menu: Menu::new(
                "PAUSED",
                vec![
                    (PauseChoice::Resume, "RESUME".to_string()),
                    (PauseChoice::Save, "SAVE".to_string()),
                    (PauseChoice::Settings, "SETTINGS".to_string()),
                    (PauseChoice::QuitToMenu, "QUIT TO MENU".to_string()),
                ],
            ),
            settings_menu: Menu::new("SETTINGS", settings_entries(&settings)),
            notice: None,
            time_seconds: 0.0,
        }
    }

    fn start_new_game(&mut self) {
        let seed = self.seed_override.unwrap_or_else(rand::random::<u64>);
        self.play = Some(PlayState::new_game(seed, self.settings.speed_index));
        self.state = GameState::Running;
    }

    fn save_to_disk(&mut self) {
        let Some(play) = self.play.as_ref() else {
            return;
        };
        let save = play.to_save(self.settings);
        match write_save(&self.save_path, &save) {
            Ok(()) => {
                info!(path = %self.save_path.display(), "game_saved");
                self.show_notice("GAME SAVED");
            }
            Err(error) => {
                warn!(error = %error, "game_save_failed");
                self.show_notice("SAVE FAILED");
            }
        }
    }

    /// Replaces the current game with the saved one. On failure the current
    /// state is left untouched.
    fn load_from_disk(&mut self) -> SceneCommand {
        match read_save(&self.save_path) {
            Ok(save) => {
                self.settings = save.settings.sanitized();
                self.settings_menu.set_entries(settings_entries(&self.settings));
                self.play = Some(PlayState::from_save(save));
                self.state = GameState::Running;
                info!(path = %self.save_path.display(), "game_loaded");
                self.show_notice("GAME LOADED");
                SceneCommand::SetFullscreen(self.settings.fullscreen)
            }
            Err(error) => {
                warn!(error = %error, "game_load_failed");
                self.show_notice("LOAD FAILED");
                SceneCommand::None
            }
        }
    }

    fn show_notice(&mut self, text: &str) {
        self.notice = Some(Notice {
            text: text.to_string(),
            remaining: NOTICE_SECONDS,
        });
    }

    fn open_settings(&mut self, return_to: SettingsReturn) {
        self.settings_menu.reset_selection();
        self.settings_menu.set_entries(settings_entries(&self.settings));
        self.state = GameState::Settings(return_to);
    }

    fn return_to_main_menu(&mut self) {
        self.play = None;
        self.main_menu.reset_selection();
        self.state = GameState::MainMenu;
    }

    fn update_main_menu(&mut self, input: &InputSnapshot) -> SceneCommand {
        match self.main_menu.handle_input(input) {
            Some(MainChoice::NewGame) => self.start_new_game(),
            Some(MainChoice::Load) => return self.load_from_disk(),
            Some(MainChoice::Settings) => self.open_settings(SettingsReturn::MainMenu),
            Some(MainChoice::Quit) => {
                info!(reason = "main_menu", "quit_requested");
                return SceneCommand::Quit;
            }
            None => {}
        }
        SceneCommand::None
    }

    fn update_running(&mut self, dt: f32, input: &InputSnapshot) -> SceneCommand {
        if input.pressed(InputAction::Back) {
            self.pause_menu.reset_selection();
            self.state = GameState::Paused;
            return SceneCommand::None;
        }
        if input.pressed(InputAction::QuickSave) {
            self.save_to_disk();
        }
        if input.pressed(InputAction::QuickLoad) {
            return self.load_from_disk();
        }

        let Some(play) = self.play.as_mut() else {
            self.state = GameState::MainMenu;
            return SceneCommand::None;
        };
        if input.pressed(InputAction::SwitchBiome) {
            play.switch_biome();
        }
        if play.tick(dt, input) == TickOutcome::Victory {
            self.state = GameState::Victory;
        }
        SceneCommand::None
    }

    fn update_paused(&mut self, input: &InputSnapshot) -> SceneCommand {
        if input.pressed(InputAction::Back) {
            self.state = GameState::Running;
            return SceneCommand::None;
        }
        match self.pause_menu.handle_input(input) {
            Some(PauseChoice::Resume) => self.state = GameState::Running,
            Some(PauseChoice::Save) => self.save_to_disk(),
            Some(PauseChoice::Settings) => self.open_settings(SettingsReturn::Paused),
            Some(PauseChoice::QuitToMenu) => self.return_to_main_menu(),
            None => {}
        }
        SceneCommand::None
    }

    fn update_settings(
        &mut self,
        input: &InputSnapshot,
        return_to: SettingsReturn,
    ) -> SceneCommand {
        let leave = input.pressed(InputAction::Back);
        let mut command = SceneCommand::None;
        let choice = if leave {
            None
        } else {
            self.settings_menu.handle_input(input)
        };
        match choice {
            Some(SettingsChoice::Speed) => {
                self.settings.cycle_speed();
                if let Some(play) = self.play.as_mut() {
                    play.player.speed_index = self.settings.speed_index;
                }
            }
            Some(SettingsChoice::Fullscreen) => {
                self.settings.fullscreen = !self.settings.fullscreen;
                command = SceneCommand::SetFullscreen(self.settings.fullscreen);
            }
            Some(SettingsChoice::HeatHaze) => self.settings.heat_haze = !self.settings.heat_haze,
            Some(SettingsChoice::NightLevel) => self.settings.cycle_night_level(),
            Some(SettingsChoice::Back) | None => {}
        }
        if choice.is_some() {
            debug!(settings = ?self.settings, "settings_changed");
            self.settings_menu.set_entries(settings_entries(&self.settings));
        }

        if leave || choice == Some(SettingsChoice::Back) {
            self.state = match return_to {
                SettingsReturn::MainMenu => GameState::MainMenu,
                SettingsReturn::Paused => GameState::Paused,
            };
        }
        command
    }

    fn update_victory(&mut self, input: &InputSnapshot) -> SceneCommand {
        if input.pressed(InputAction::Confirm) {
            self.start_new_game();
        } else if input.pressed(InputAction::Back) {
            self.return_to_main_menu();
        }
        SceneCommand::None
    }

    fn draw_play_or_backdrop(&self, canvas: &mut Canvas<'_>) {
        match self.play.as_ref() {
            Some(play) => play.draw(canvas, &self.settings, self.time_seconds),
            None => canvas.clear(MENU_BACKDROP_COLOR),
        }
    }

    fn draw_victory_banner(&self, canvas: &mut Canvas<'_>) {
        let width = canvas.width() as i32;
        let height = canvas.height() as i32;
        canvas.blend_rect(0, 0, width, height, BANNER_COLOR);
        draw_centered(canvas, "YOU FOUND THE TRUE PORTAL!", height / 3, 4);
        draw_centered(canvas, "ENTER: NEW GAME   ESC: MAIN MENU", height / 2, 2);
    }

    fn draw_notice(&self, canvas: &mut Canvas<'_>) {
        if let Some(notice) = &self.notice {
            let y = canvas.height() as i32 - 40;
            let x = (canvas.width() as i32 - text_width_px(&notice.text, 2)) / 2;
            draw_text(canvas, x, y, &notice.text, NOTICE_COLOR, 2);
        }
    }
}

fn draw_centered(canvas: &mut Canvas<'_>, text: &str, y: i32, scale: i32) {
    let x = (canvas.width() as i32 - text_width_px(text, scale)) / 2;
    draw_text(canvas, x, y, text, BANNER_TEXT_COLOR, scale);
}

fn settings_entries(settings: &Settings) -> Vec<(SettingsChoice, String)> {
    vec![
        (SettingsChoice::Speed, settings.speed_label()),
        (SettingsChoice::Fullscreen, settings.fullscreen_label()),
        (SettingsChoice::HeatHaze, settings.heat_haze_label()),
        (SettingsChoice::NightLevel, settings.night_label()),
        (SettingsChoice::Back, "BACK".to_string()),
    ]
}

impl Scene for GameSession {
    fn load(&mut self) {
        info!(
            save_path = %self.save_path.display(),
            seed_override = ?self.seed_override,
            "session_ready"
        );
    }

    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) -> SceneCommand {
        self.time_seconds += fixed_dt_seconds;
        if let Some(notice) = self.notice.as_mut() {
            notice.remaining -= fixed_dt_seconds;
            if notice.remaining <= 0.0 {
                self.notice = None;
            }
        }

        match self.state {
            GameState::MainMenu => self.update_main_menu(input),
            GameState::Running => self.update_running(fixed_dt_seconds, input),
            GameState::Paused => self.update_paused(input),
            GameState::Settings(return_to) => self.update_settings(input, return_to),
            GameState::Victory => self.update_victory(input),
        }
    }

    fn render(&mut self, canvas: &mut Canvas<'_>) {
        match self.state {
            GameState::MainMenu => {
                canvas.clear(MENU_BACKDROP_COLOR);
                self.main_menu.draw(canvas);
            }
            GameState::Running => self.draw_play_or_backdrop(canvas),
            GameState::Paused => {
                self.draw_play_or_backdrop(canvas);
                self.pause_menu.draw(canvas);
            }
            GameState::Settings(SettingsReturn::Paused) => {
                self.draw_play_or_backdrop(canvas);
                self.settings_menu.draw(canvas);
            }
            GameState::Settings(SettingsReturn::MainMenu) => {
                canvas.clear(MENU_BACKDROP_COLOR);
                self.settings_menu.draw(canvas);
            }
            GameState::Victory => {
                self.draw_play_or_backdrop(canvas);
                self.draw_victory_banner(canvas);
            }
        }
        self.draw_notice(canvas);
    }

    fn unload(&mut self) {
        info!(in_game = self.play.is_some(), "session_closed");
    }

    fn debug_title(&self) -> Option<String> {
        self.play
            .as_ref()
            .map(|play| format!("Desert Portals - {}", play.current.as_str()))
    }

    fn debug_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("STATE: {:?}", self.state)];
        if let Some(play) = self.play.as_ref() {
            let world = play.world();
            lines.push(format!("SEED: {}", world.seed()));
            lines.push(format!("BIOME: {}", world.biome().as_str()));
            lines.push(format!(
                "POS: {:.0},{:.0}",
                play.player.pos.x, play.player.pos.y
            ));
            lines.push(format!(
                "ROCKS: {}  PICKUPS: {}",
                world.rocks().len(),
                world.pickups().len()
            ));
            lines.push(format!("DAY: {:.0}S", play.clock.elapsed()));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use engine::PixelBuffer;
    use tempfile::{tempdir, TempDir};

    use super::*;
    use crate::app::collision::body_rect;
    use crate::app::save::{parse_save_json, SavedPickup};

    const DT: f32 = 1.0 / 60.0;

    fn session() -> (TempDir, GameSession) {
        let dir = tempdir().expect("tempdir");
        let session = GameSession::new(dir.path().join("saves").join("save.json"), Some(7));
        (dir, session)
    }

    fn press(action: InputAction) -> InputSnapshot {
        InputSnapshot::empty().with_pressed(action)
    }

    fn idle() -> InputSnapshot {
        InputSnapshot::empty()
    }

    fn running_session() -> (TempDir, GameSession) {
        let (dir, mut session) = session();
        session.update(DT, &press(InputAction::Confirm));
        assert_eq!(session.state, GameState::Running);
        let play = session.play.as_mut().expect("play");
        // Park portals far away so ticks never trigger them by accident.
        play.true_portal.pos = Vec2::new(-5000.0, -5000.0);
        play.trap_portal.pos = Vec2::new(-5000.0, -5000.0);
        (dir, session)
    }

    fn play(session: &mut GameSession) -> &mut PlayState {
        session.play.as_mut().expect("play")
    }

    #[test]
    fn escape_pauses_and_resumes() {
        let (_dir, mut session) = running_session();
        session.update(DT, &press(InputAction::Back));
        assert_eq!(session.state, GameState::Paused);
        session.update(DT, &press(InputAction::Back));
        assert_eq!(session.state, GameState::Running);
    }

    #[test]
    fn quit_from_main_menu_requests_exit() {
        let (_dir, mut session) = session();
        session.update(DT, &press(InputAction::MoveUp));
        assert_eq!(
            session.update(DT, &press(InputAction::Confirm)),
            SceneCommand::Quit
        );
    }

    #[test]
    fn fixed_seed_starts_identical_games() {
        let (_a, mut first) = running_session();
        let (_b, mut second) = running_session();
        let first = play(&mut first);
        let second = play(&mut second);
        assert_eq!(first.desert.rocks(), second.desert.rocks());
        assert_eq!(first.forest.pickups(), second.forest.pickups());
        assert_eq!(first.desert.seed(), 7);
    }

    #[test]
    fn walking_onto_pickup_collects_it_once() {
        let (_dir, mut session) = running_session();
        let play = play(&mut session);
        let pos = play.player.pos;
        let mut saved = play.desert.to_saved();
        saved.pickups = vec![SavedPickup {
            kind: "torch".to_string(),
            pos: [pos.x, pos.y],
        }];
        play.desert = World::from_saved(saved);

        play.tick(DT, &idle());
        play.tick(DT, &idle());
        assert_eq!(play.player.inventory.torch, 1);
        assert!(play.desert.pickups().is_empty());
    }

    #[test]
    fn true_portal_wins_and_trap_returns_to_spawn() {
        let (_dir, mut session) = running_session();
        {
            let play = play(&mut session);
            play.trap_portal.pos = play.player.pos + Vec2::new(300.0, 0.0);
            play.player.pos = play.trap_portal.pos;
        }
        session.update(DT, &idle());
        assert_eq!(session.state, GameState::Running);
        assert_eq!(play(&mut session).player.pos, player_spawn());

        {
            let play = play(&mut session);
            play.true_portal.pos = play.player.pos;
        }
        session.update(DT, &idle());
        assert_eq!(session.state, GameState::Victory);

        session.update(DT, &press(InputAction::Back));
        assert_eq!(session.state, GameState::MainMenu);
        assert!(session.play.is_none());
    }

    #[test]
    fn new_game_starts_the_player_beside_a_rock_covering_spawn() {
        let play = PlayState::new_game(52, 1);
        let spawn_body = body_rect(player_spawn());
        assert!(!play.desert.colliding_rocks(spawn_body).is_empty());
        assert_eq!(play.player.pos, Vec2::new(1224.0, 900.0));
        let body = play.player.rect();
        assert!(play.desert.colliding_rocks(body).is_empty());
    }

    #[test]
    fn trap_portal_sends_player_to_free_spot_near_spawn_in_current_biome() {
        let mut play = PlayState::new_game(14, 1);
        let spawn_body = body_rect(player_spawn());
        assert!(!play.forest.colliding_rocks(spawn_body).is_empty());
        play.current = Biome::Forest;
        play.true_portal.pos = Vec2::new(-5000.0, -5000.0);
        play.trap_portal.pos = Vec2::new(600.0, 600.0);
        play.player.pos = play.trap_portal.pos;

        assert_eq!(play.tick(DT, &idle()), TickOutcome::Continue);
        assert_eq!(play.player.pos, Vec2::new(1224.0, 900.0));
        let body = play.player.rect();
        assert!(play.forest.colliding_rocks(body).is_empty());
    }

    #[test]
    fn non_finite_saved_portals_fall_back_to_placed_ones() {
        let original = PlayState::new_game(9, 1);
        let mut save = original.to_save(Settings::default());
        save.portals.true_portal = Some([f32::NAN, 10.0]);
        save.portals.fake = Some([f32::INFINITY, 0.0]);

        let play = PlayState::from_save(save);
        assert_eq!(play.true_portal.pos, original.true_portal.pos);
        assert_eq!(play.trap_portal.pos, original.trap_portal.pos);
        assert_eq!(play.true_portal.kind, PortalKind::True);
        assert_eq!(play.trap_portal.kind, PortalKind::Trap);
    }

    #[test]
    fn biome_switch_relocates_player_out_of_rocks() {
        let (_dir, mut session) = running_session();
        let play = play(&mut session);
        let forest_rock = play.forest.rocks()[0];
        play.player.pos = forest_rock.center();
        play.switch_biome();

        assert_eq!(play.current, Biome::Forest);
        let body = play.player.rect();
        assert!(play.forest.colliding_rocks(body).is_empty());

        play.switch_biome();
        assert_eq!(play.current, Biome::Desert);
    }

    #[test]
    fn tab_switches_biome_through_scene_update() {
        let (_dir, mut session) = running_session();
        session.update(DT, &press(InputAction::SwitchBiome));
        assert_eq!(play(&mut session).current, Biome::Forest);
        assert_eq!(
            session.debug_title().as_deref(),
            Some("Desert Portals - forest")
        );
    }

    #[test]
    fn quick_save_then_quick_load_restores_session() {
        let (_dir, mut session) = running_session();
        {
            let play = play(&mut session);
            play.player.pos = Vec2::new(400.0, 300.0);
            play.player.inventory.water = 4;
            let first = play.forest.pickups()[0].pos;
            play.forest.remove_pickup_at(first, 0.0);
            play.current = Biome::Forest;
        }
        let expected_pickups = play(&mut session).forest.pickups().to_vec();
        let expected_rocks = play(&mut session).forest.rocks().to_vec();
        let expected_true = play(&mut session).true_portal.pos;

        session.update(DT, &press(InputAction::QuickSave));
        assert!(session.save_path.exists());

        {
            let play = play(&mut session);
            play.player.pos = Vec2::new(1.0, 1.0);
            play.player.inventory.water = 0;
            play.current = Biome::Desert;
        }
        let command = session.update(DT, &press(InputAction::QuickLoad));
        assert_eq!(command, SceneCommand::SetFullscreen(false));

        let play = play(&mut session);
        assert_eq!(play.current, Biome::Forest);
        assert_eq!(play.player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(play.player.inventory.water, 4);
        assert_eq!(play.forest.pickups(), expected_pickups.as_slice());
        assert_eq!(play.forest.rocks(), expected_rocks.as_slice());
        assert_eq!(play.true_portal.pos, expected_true);
        assert_eq!(play.true_portal.kind, PortalKind::True);
    }

    #[test]
    fn load_without_save_file_stays_in_menu() {
        let (_dir, mut session) = session();
        session.update(DT, &press(InputAction::MoveDown));
        session.update(DT, &press(InputAction::Confirm));
        assert_eq!(session.state, GameState::MainMenu);
        assert!(session.play.is_none());
        assert!(session.notice.is_some());
    }

    #[test]
    fn sparse_save_loads_with_defaults() {
        let save = parse_save_json(
            r#"{
                "worlds": {"desert": {"seed": 11, "pickups": [{"type": "gem", "pos": [5, 5]}]}},
                "current_biome": "moon",
                "settings": {"night_level": 2}
            }"#,
        )
        .expect("parse");
        let play = PlayState::from_save(save);

        assert_eq!(play.current, Biome::Desert);
        assert_eq!(play.desert.seed(), 11);
        assert!(play.desert.pickups().is_empty());
        assert_eq!(play.forest.biome(), Biome::Forest);
        assert_eq!(play.player.pos, player_spawn());
        assert_eq!(play.player.speed_index, 1);
    }

    #[test]
    fn settings_menu_toggles_fullscreen_and_returns() {
        let (_dir, mut session) = session();
        session.update(DT, &press(InputAction::MoveDown));
        session.update(DT, &press(InputAction::MoveDown));
        session.update(DT, &press(InputAction::Confirm));
        assert_eq!(
            session.state,
            GameState::Settings(SettingsReturn::MainMenu)
        );

        session.update(DT, &press(InputAction::MoveDown));
        let command = session.update(DT, &press(InputAction::Confirm));
        assert_eq!(command, SceneCommand::SetFullscreen(true));
        assert!(session.settings.fullscreen);

        session.update(DT, &press(InputAction::Back));
        assert_eq!(session.state, GameState::MainMenu);
    }

    #[test]
    fn speed_setting_applies_to_player_in_game() {
        let (_dir, mut session) = running_session();
        session.update(DT, &press(InputAction::Back));
        session.update(DT, &press(InputAction::MoveDown));
        session.update(DT, &press(InputAction::MoveDown));
        session.update(DT, &press(InputAction::Confirm));
        assert_eq!(session.state, GameState::Settings(SettingsReturn::Paused));

        session.update(DT, &press(InputAction::Confirm));
        assert_eq!(session.settings.speed_index, 2);
        assert_eq!(play(&mut session).player.speed_index, 2);
    }

    #[test]
    fn camera_tracks_player_within_world() {
        let (_dir, mut session) = running_session();
        let input = InputSnapshot::empty().with_window_size((960, 540));
        play(&mut session).player.pos = Vec2::new(2390.0, 1790.0);
        session.update(DT, &input);
        let play = play(&mut session);
        assert_eq!(play.camera.offset, Vec2::new(1440.0, 1260.0));
    }

    #[test]
    fn render_paints_every_state_without_panicking() {
        let (_dir, mut session) = running_session();
        let mut buffer = PixelBuffer::new_filled(320, 180, [0, 0, 0, 255]);
        session.render(&mut buffer.canvas());
        session.update(DT, &press(InputAction::Back));
        session.render(&mut buffer.canvas());
        session.state = GameState::Victory;
        session.render(&mut buffer.canvas());
        session.return_to_main_menu();
        session.render(&mut buffer.canvas());
        assert_eq!(buffer.pixel(0, 0).map(|px| px[3]), Some(255));
    }

    #[test]
    fn debug_lines_describe_current_world() {
        let (_dir, session) = running_session();
        let lines = session.debug_lines();
        assert!(lines.iter().any(|line| line == "SEED: 7"));
        assert!(lines.iter().any(|line| line == "BIOME: desert"));
    }
}
