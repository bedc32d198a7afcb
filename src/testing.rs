//! An in memory [XConn] that records properties, for driving hooks and key
//! handlers without an X server.
use penrose::{
    core::{
        bindings::{KeyCode, MouseState},
        Config, State, WindowManager,
    },
    pure::geometry::{Point, Rect},
    x::{
        event::{ClientMessage, XEvent},
        property::{Prop, WindowAttributes, WmState},
        ClientAttr, ClientConfig, XConn,
    },
    Error, Result, Xid,
};
use std::{cell::RefCell, collections::HashMap, rc::Rc};

#[derive(Debug, Clone, Default)]
pub struct RecordingConn {
    props: Rc<RefCell<HashMap<(Xid, String), Prop>>>,
}

impl RecordingConn {
    pub fn with_prop(self, id: Xid, name: &str, val: Prop) -> Self {
        self.props.borrow_mut().insert((id, name.to_owned()), val);
        self
    }

    pub fn prop(&self, id: Xid, name: &str) -> Option<Prop> {
        self.props.borrow().get(&(id, name.to_owned())).cloned()
    }

    pub fn utf8(&self, id: Xid, name: &str) -> Option<String> {
        match self.prop(id, name)? {
            Prop::UTF8String(mut strs) if !strs.is_empty() => Some(strs.remove(0)),
            _ => None,
        }
    }

    /// A fresh window manager state on a single 1920x1080 screen.
    pub fn state(&self, config: Config<Self>) -> State<Self> {
        let wm = WindowManager::new(config, HashMap::new(), HashMap::new(), self.clone())
            .expect("a state for the recording connection");

        wm.state
    }
}

impl XConn for RecordingConn {
    fn root(&self) -> Xid {
        Xid::from(0)
    }

    fn screen_details(&self) -> Result<Vec<Rect>> {
        Ok(vec![Rect::new(0, 0, 1920, 1080)])
    }

    fn cursor_position(&self) -> Result<Point> {
        Ok(Point::new(0, 0))
    }

    fn grab(&self, _: &[KeyCode], _: &[MouseState]) -> Result<()> {
        Ok(())
    }

    fn next_event(&self) -> Result<XEvent> {
        Err(Error::Custom("no events".to_owned()))
    }

    fn flush(&self) {}

    fn intern_atom(&self, _: &str) -> Result<Xid> {
        Ok(Xid::from(1))
    }

    fn atom_name(&self, _: Xid) -> Result<String> {
        Ok(String::new())
    }

    fn client_geometry(&self, _: Xid) -> Result<Rect> {
        Ok(Rect::new(0, 0, 100, 100))
    }

    fn existing_clients(&self) -> Result<Vec<Xid>> {
        Ok(Vec::new())
    }

    fn map(&self, _: Xid) -> Result<()> {
        Ok(())
    }

    fn unmap(&self, _: Xid) -> Result<()> {
        Ok(())
    }

    fn kill(&self, _: Xid) -> Result<()> {
        Ok(())
    }

    fn focus(&self, _: Xid) -> Result<()> {
        Ok(())
    }

    fn get_prop(&self, client: Xid, prop_name: &str) -> Result<Option<Prop>> {
        Ok(self.prop(client, prop_name))
    }

    fn list_props(&self, client: Xid) -> Result<Vec<String>> {
        Ok(self
            .props
            .borrow()
            .keys()
            .filter(|(id, _)| *id == client)
            .map(|(_, name)| name.clone())
            .collect())
    }

    fn get_wm_state(&self, _: Xid) -> Result<Option<WmState>> {
        Ok(None)
    }

    fn get_window_attributes(&self, _: Xid) -> Result<WindowAttributes> {
        Err(Error::Custom("no window attributes".to_owned()))
    }

    fn set_wm_state(&self, _: Xid, _: WmState) -> Result<()> {
        Ok(())
    }

    fn set_prop(&self, client: Xid, name: &str, val: Prop) -> Result<()> {
        self.props.borrow_mut().insert((client, name.to_owned()), val);
        Ok(())
    }

    fn delete_prop(&self, client: Xid, prop_name: &str) -> Result<()> {
        self.props.borrow_mut().remove(&(client, prop_name.to_owned()));
        Ok(())
    }

    fn set_client_attributes(&self, _: Xid, _: &[ClientAttr]) -> Result<()> {
        Ok(())
    }

    fn set_client_config(&self, _: Xid, _: &[ClientConfig]) -> Result<()> {
        Ok(())
    }

    fn send_client_message(&self, _: ClientMessage) -> Result<()> {
        Ok(())
    }

    fn warp_pointer(&self, _: Xid, _: i16, _: i16) -> Result<()> {
        Ok(())
    }
}
