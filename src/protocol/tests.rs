use super::*;
use crate::error::{PlaylistError, RequestError};

#[test]
fn parses_every_command_code() {
    assert_eq!(
        Command::parse("SRH_S::NULL::In the End::NULL").unwrap(),
        Command::SearchTrack {
            title: "In the End".into()
        }
    );
    assert_eq!(
        Command::parse("SRH_P::Gym::NULL::NULL").unwrap(),
        Command::SearchPlaylist {
            playlist: "Gym".into()
        }
    );
    assert_eq!(
        Command::parse("SHW_FP::NULL::NULL::NULL").unwrap(),
        Command::ShowPlaylists
    );
    assert_eq!(
        Command::parse("PLAY_S::NULL::Numb::NULL").unwrap(),
        Command::Play {
            playlist: NULL.into(),
            title: "Numb".into()
        }
    );
    assert_eq!(
        Command::parse("ADD_S::Gym::Numb::NULL").unwrap(),
        Command::AddTrack {
            playlist: "Gym".into(),
            title: "Numb".into()
        }
    );
    assert_eq!(
        Command::parse("DEL_S::Gym::Numb::NULL").unwrap(),
        Command::DeleteTrack {
            playlist: "Gym".into(),
            title: "Numb".into()
        }
    );
    assert_eq!(
        Command::parse("ADD_P::Gym::NULL::NULL").unwrap(),
        Command::AddPlaylist {
            playlist: "Gym".into()
        }
    );
    assert_eq!(
        Command::parse("DEL_P::Gym::NULL::NULL").unwrap(),
        Command::DeletePlaylist {
            playlist: "Gym".into()
        }
    );
    assert_eq!(
        Command::parse("FLT_Y::Gym::NULL::2000").unwrap(),
        Command::FilterYear {
            playlist: "Gym".into(),
            year: 2000
        }
    );
    assert_eq!(
        Command::parse("FLT_L::Gym::NULL::4").unwrap(),
        Command::FilterLength {
            playlist: "Gym".into(),
            max_minutes: 4
        }
    );
    assert_eq!(
        Command::parse("FLT_A::Gym::NULL::Hybrid Theory").unwrap(),
        Command::FilterAlbum {
            playlist: "Gym".into(),
            album: "Hybrid Theory".into()
        }
    );
}

#[test]
fn code_round_trips_through_parse() {
    for line in [
        "SRH_S::a::b::c",
        "SHW_FP::a::b::c",
        "FLT_L::a::b::3",
        "DEL_P::a::b::c",
    ] {
        let cmd: Command = line.parse().unwrap();
        assert!(line.starts_with(cmd.code()));
    }
}

#[test]
fn trailing_newline_is_ignored() {
    assert_eq!(
        Command::parse("SHW_FP::NULL::NULL::NULL\r\n").unwrap(),
        Command::ShowPlaylists
    );
}

#[test]
fn extra_field_keeps_embedded_delimiters() {
    assert_eq!(
        Command::parse("FLT_A::Gym::NULL::Live::Disc 2").unwrap(),
        Command::FilterAlbum {
            playlist: "Gym".into(),
            album: "Live::Disc 2".into()
        }
    );
}

#[test]
fn malformed_requests_are_rejected() {
    assert_eq!(
        Command::parse("ADD_P::Gym").unwrap_err(),
        RequestError::MissingFields(2)
    );
    assert_eq!(Command::parse("").unwrap_err(), RequestError::MissingFields(1));
    assert_eq!(
        Command::parse("JUNK::a::b::c").unwrap_err(),
        RequestError::UnknownCode("JUNK".into())
    );
    assert!(matches!(
        Command::parse("FLT_Y::Gym::NULL::two thousand"),
        Err(RequestError::InvalidNumber { field: "year", .. })
    ));
    assert!(matches!(
        Command::parse("FLT_L::Gym::NULL::-3"),
        Err(RequestError::InvalidNumber { field: "minutes", .. })
    ));
}

#[test]
fn request_errors_reply_invalid_input() {
    let reply = Reply::from(&RequestError::UnknownCode("X".into()));
    assert_eq!(reply.body, INVALID_INPUT);
    assert_eq!(reply.status, Status::MalformedRequest);
}

#[test]
fn status_follows_playlist_errors() {
    let cases = [
        (PlaylistError::PlaylistNotFound("a".into()), 1),
        (PlaylistError::PlaylistAlreadyExists("a".into()), 2),
        (PlaylistError::TrackNotFound("a".into()), 3),
        (
            PlaylistError::TrackAlreadyInPlaylist {
                playlist: "a".into(),
                title: "b".into(),
            },
            4,
        ),
        (PlaylistError::ReadOnlyPlaylist("a".into()), 5),
    ];
    for (err, code) in cases {
        let status = Status::from(&err);
        assert_eq!(status.code(), code);
        assert_eq!(Status::try_from(code), Ok(status));
    }
    assert_eq!(Status::try_from(42), Err(42));
}

#[test]
fn lines_terminates_each_line() {
    assert_eq!(Reply::lines(["a b", "c"]), "a b\nc\n");
    assert_eq!(Reply::lines(Vec::<String>::new()), "");
}

#[test]
fn header_layout_is_kind_status_big_endian_length() {
    let header = FrameHeader::new(Kind::Text, Status::TrackNotFound, 0x0102_0304).unwrap();
    assert_eq!(header.encode(), [b'T', 3, 1, 2, 3, 4]);
    assert_eq!(FrameHeader::decode(header.encode()).unwrap(), header);
}

#[test]
fn decode_rejects_unknown_kind_and_status() {
    assert!(FrameHeader::decode([b'X', 0, 0, 0, 0, 0]).is_err());
    assert!(FrameHeader::decode([b'A', 99, 0, 0, 0, 0]).is_err());
}

#[tokio::test]
async fn read_frame_returns_header_and_payload() {
    let mut wire = Vec::new();
    FrameHeader::new(Kind::Audio, Status::Ok, 3)
        .unwrap()
        .write_to(&mut wire)
        .await
        .unwrap();
    wire.extend_from_slice(b"abcTRAILING");

    let mut reader = &wire[..];
    let (header, payload) = read_frame(&mut reader).await.unwrap();
    assert_eq!(header.kind, Kind::Audio);
    assert!(header.status.is_ok());
    assert_eq!(payload, b"abc");
    assert_eq!(reader, b"TRAILING");
}
