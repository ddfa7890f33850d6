/// This file contains the application model
use std::time::Duration;

use tokio::sync::mpsc;
use tuirealm::terminal::TerminalBridge;
use tuirealm::{Application, ApplicationError, EventListenerCfg, Sub, SubClause, SubEventClause};
use tuirealm::Update;

use crate::app::client::{
    components,
    types::{self, ClientArgs, ClientConfig, Id, Msg},
};

use super::{
    layout,
    network::{self, types::UserEvent, NetworkClient},
};

pub type ModelResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

pub struct Model {
    /// Application
    pub app: Application<Id, Msg, UserEvent>,
    /// Requests for the network client
    pub network_channel: mpsc::UnboundedSender<network::types::Request>,
    /// Indicates that the application must quit
    pub quit: bool,
    /// Tells whether to redraw interface
    pub redraw: bool,
    /// Used to draw to terminal
    pub terminal: TerminalBridge,
    /// State of the application
    pub state: types::AppState,
    /// In order to safely close any open connections
    pub network_join_handler: Option<std::thread::JoinHandle<()>>,
}

impl Model {
    pub fn new(config: ClientConfig, args: ClientArgs) -> ModelResult<Self> {
        let (network_sender, network_receiver) =
            mpsc::unbounded_channel::<network::types::Request>();

        let mut network_client = NetworkClient::default();
        let cloned_network_client = network_client.clone();

        let join_handler = std::thread::spawn(move || {
            network_client.start_network_client(network_receiver, config, args)
        });

        Ok(Self {
            app: Self::init_app(cloned_network_client)?,
            network_channel: network_sender,
            quit: false,
            redraw: true,
            terminal: TerminalBridge::new()?,
            state: types::AppState::default(),
            network_join_handler: Some(join_handler),
        })
    }
}

impl Model {
    pub fn view(&mut self) -> std::io::Result<()> {
        self.terminal.raw_mut().draw(|f| {
            let custom_layout = layout::CustomLayout::new(f.size());

            self.app.view(&Id::RoomInput, f, custom_layout.room_input);
            self.app.view(&Id::RoomList, f, custom_layout.room_list);
            self.app.view(&Id::Help, f, custom_layout.navigation);
            self.app.view(&Id::VoteTable, f, custom_layout.vote_table);
            self.app.view(&Id::VotePicker, f, custom_layout.vote_picker);
            self.app.view(&Id::BottomBar, f, custom_layout.bottom_bar);
        })?;

        Ok(())
    }

    fn init_app(
        network_client: NetworkClient,
    ) -> Result<Application<Id, Msg, UserEvent>, ApplicationError> {
        let mut app: Application<Id, Msg, UserEvent> = Application::init(
            EventListenerCfg::default()
                .default_input_listener(Duration::from_millis(20))
                .port(Box::new(network_client), Duration::from_millis(10))
                .poll_timeout(Duration::from_millis(10))
                .tick_interval(Duration::from_secs(1)),
        );

        let network_events = || vec![Sub::new(SubEventClause::Any, SubClause::Always)];

        app.mount(
            Id::RoomInput,
            Box::<components::room_input::RoomInput>::default(),
            Vec::default(),
        )?;

        app.mount(
            Id::VotePicker,
            Box::<components::vote_picker::VotePicker>::default(),
            Vec::default(),
        )?;

        app.mount(
            Id::RoomList,
            Box::<components::room_list::RoomList>::default(),
            network_events(),
        )?;

        app.mount(
            Id::VoteTable,
            Box::<components::vote_table::VoteTable>::default(),
            network_events(),
        )?;

        app.mount(
            Id::BottomBar,
            Box::<components::bottom_bar::BottomBar>::default(),
            network_events(),
        )?;

        app.mount(
            Id::Help,
            Box::<components::help::Help>::default(),
            Vec::default(),
        )?;

        app.active(&Id::RoomInput)?;
        Ok(app)
    }

    fn send_request(&self, request: network::types::Request) {
        if self.network_channel.send(request).is_err() {
            tracing::error!("The network client is no longer running");
        }
    }

    fn focus(&mut self, id: Id) {
        if let Err(error) = self.app.active(&id) {
            tracing::error!(?error, "Could not focus {id:?}");
        }
    }
}

impl Update<Msg> for Model {
    fn update(&mut self, msg: Option<Msg>) -> Option<Msg> {
        let msg = msg?;
        self.redraw = true;

        match msg {
            Msg::AppClose => {
                self.quit = true;
                self.send_request(network::types::Request::Quit);
                if let Some(network_join_handler) = self.network_join_handler.take() {
                    if network_join_handler.join().is_err() {
                        tracing::error!("The network client panicked");
                    }
                }
                None
            }
            Msg::ReDraw => None,
            Msg::FocusNext => {
                let next = match self.app.focus() {
                    Some(Id::RoomInput) if self.state.is_in_room() => Id::VotePicker,
                    _ => Id::RoomInput,
                };
                self.focus(next);
                None
            }
            Msg::JoinRoom(room_name) => {
                self.send_request(network::types::Request::JoinRoom {
                    room_name: Some(room_name),
                });
                None
            }
            Msg::CastVote(vote) => {
                self.send_request(network::types::Request::CastVote(vote));
                None
            }
            Msg::ResetVotes => {
                self.send_request(network::types::Request::ResetVotes);
                None
            }
            Msg::StateUpdate(state_update) => {
                self.state = self.state.clone().apply_update(state_update);
                self.focus(Id::VotePicker);
                None
            }
        }
    }
}
