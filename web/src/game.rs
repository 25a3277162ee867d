use crate::canvas::CanvasRenderer;
use crate::utils::*;
use sweeper_core as game;
use game::{GameResult, Input, Intent, SessionHost};
use web_sys::{Element, HtmlCanvasElement};
use yew::prelude::*;

/// Collects the terminal notification so the view can offer a replay.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
struct Banner(Option<GameResult>);

impl SessionHost for Banner {
    fn game_over(&mut self, result: GameResult) {
        log::info!("{}", result.message());
        self.0 = Some(result);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Pointer {
        intent: Intent,
        offset: (f64, f64),
        extent: (f64, f64),
    },
    NewGame,
}

impl Msg {
    fn from_pointer(e: &MouseEvent) -> Option<Self> {
        let intent = Intent::from_button(e.button())?;
        let target: Element = e.target_dyn_into()?;
        Some(Self::Pointer {
            intent,
            offset: (f64::from(e.offset_x()), f64::from(e.offset_y())),
            extent: (
                f64::from(target.client_width()),
                f64::from(target.client_height()),
            ),
        })
    }
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub config: game::GameConfig,
    pub seed: u64,
    /// Canvas side length in pixels
    pub width: u32,
}

#[derive(Debug)]
pub(crate) struct GameView {
    session: game::Session,
    canvas: NodeRef,
    banner: Banner,
}

impl GameView {
    fn renderer(&self) -> Option<CanvasRenderer> {
        let canvas = self.canvas.cast::<HtmlCanvasElement>()?;
        match CanvasRenderer::attach(&canvas, self.session.config().size) {
            Ok(renderer) => Some(renderer),
            Err(err) => {
                log::error!("failed to attach canvas: {:?}", err);
                None
            }
        }
    }

    fn state_class(&self) -> Classes {
        classes!(match self.session.board().result() {
            GameResult::InProgress => "in-progress",
            GameResult::Won => "win",
            GameResult::Lost => "lose",
        })
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let GameProps { config, seed, .. } = *ctx.props();
        Self {
            session: game::Session::new(config, seed),
            canvas: NodeRef::default(),
            banner: Banner::default(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        let input = match msg {
            Msg::Pointer {
                intent,
                offset,
                extent,
            } => match game::locate(offset, extent, self.session.config().size) {
                Some(coords) => intent.at(coords),
                None => {
                    log::trace!("pointer at {:?} is outside the board", offset);
                    return false;
                }
            },
            Msg::NewGame => {
                self.banner = Banner::default();
                Input::Reset
            }
        };
        log::debug!("input: {:?}", input);

        let Some(mut renderer) = self.renderer() else {
            return false;
        };
        self.session
            .dispatch_to(input, &mut renderer, &mut self.banner)
            .updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let board = self.session.board();
        let mines_left = format_for_counter(board.mines_left());
        let moves = format_for_counter(self.session.move_count().try_into().unwrap_or(i32::MAX));
        let side = ctx.props().width.to_string();

        let on_pointer = ctx.link().batch_callback(|e: MouseEvent| {
            e.prevent_default();
            Msg::from_pointer(&e)
        });
        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::NewGame
        });

        html! {
            <div class="sweeper">
                <nav>
                    <aside>{mines_left}</aside>
                    <span><button class={self.state_class()} onclick={cb_new_game.clone()}>{"New game"}</button></span>
                    <aside>{moves}</aside>
                </nav>
                <canvas
                    ref={self.canvas.clone()}
                    width={side.clone()}
                    height={side}
                    onclick={on_pointer.clone()}
                    oncontextmenu={on_pointer}
                />
                if let Some(result) = self.banner.0 {
                    <dialog open={true}>
                        <p>{result.message()}</p>
                        <button onclick={cb_new_game}>{"Play again"}</button>
                    </dialog>
                }
            </div>
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, first_render: bool) {
        if !first_render {
            return;
        }
        if let Some(mut renderer) = self.renderer() {
            self.session.redraw(&mut renderer);
        }
    }
}
