use std::path::PathBuf;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::oneshot;

use super::*;
use crate::library::Track;
use crate::protocol::{Kind, Status, read_frame};

fn catalog() -> Arc<Catalog> {
    Arc::new(Catalog::from_tracks(vec![Track {
        path: PathBuf::from("/nonexistent/numb.mp3"),
        title: "Numb".into(),
        artist: "Linkin Park".into(),
        album: "Meteora".into(),
        genre: "Rock".into(),
        year: Some(2003),
        duration: Duration::from_secs(185),
    }]))
}

async fn ask(conn: &mut TcpStream, line: &str) -> (Status, String) {
    conn.write_all(format!("{line}\n").as_bytes()).await.unwrap();
    let (header, payload) = read_frame(conn).await.unwrap();
    assert_eq!(header.kind, Kind::Text);
    (header.status, String::from_utf8(payload).unwrap())
}

#[tokio::test]
async fn concurrent_sessions_keep_separate_playlists() {
    let server = Server::bind("127.0.0.1:0", catalog(), SessionOptions::default())
        .await
        .unwrap();
    let addr = server.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let acceptor = tokio::spawn(server.serve_until(async move {
        let _ = stop_rx.await;
    }));

    let mut a = TcpStream::connect(addr).await.unwrap();
    let mut b = TcpStream::connect(addr).await.unwrap();

    let (sa, ba) = ask(&mut a, "ADD_P::Favorites::NULL::NULL").await;
    let (sb, bb) = ask(&mut b, "ADD_P::Favorites::NULL::NULL").await;
    assert_eq!((sa, sb), (Status::Ok, Status::Ok));
    assert_eq!(ba, "Favorites 0\n");
    assert_eq!(bb, "Favorites 0\n");

    ask(&mut a, "ADD_S::Favorites::Numb::NULL").await;
    ask(&mut b, "ADD_P::Commute::NULL::NULL").await;

    let (_, list_a) = ask(&mut a, "SHW_FP::NULL::NULL::NULL").await;
    let (_, list_b) = ask(&mut b, "SHW_FP::NULL::NULL::NULL").await;
    assert_eq!(list_a, "Favorites 1\n");
    assert_eq!(list_b, "Favorites 0\nCommute 0\n");

    stop_tx.send(()).unwrap();
    assert_eq!(acceptor.await.unwrap(), 2);
}

#[tokio::test]
async fn a_failing_session_does_not_affect_others() {
    let server = Server::bind("127.0.0.1:0", catalog(), SessionOptions::default())
        .await
        .unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(server.serve());

    let mut healthy = TcpStream::connect(addr).await.unwrap();
    ask(&mut healthy, "ADD_P::Mine::NULL::NULL").await;

    {
        let mut doomed = TcpStream::connect(addr).await.unwrap();
        let (status, body) = ask(&mut doomed, "nonsense").await;
        assert_eq!(status, Status::MalformedRequest);
        assert_eq!(body, "Invalid Input");
        // dropped here mid-session
    }

    let (status, body) = ask(&mut healthy, "SRH_P::Mine::NULL::NULL").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body, "");

    let (status, body) = ask(&mut healthy, "PLAY_S::NULL::Numb::NULL").await;
    assert_eq!(status, Status::IoError);
    assert_eq!(body, "Unable to open Numb");
}
