use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn run(bin: &str, args: &[&str], dir: &Path) -> Output {
    Command::new(bin)
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run binary")
}

fn keygen(dir: &Path, num_bits: &str) {
    let out = run(
        env!("CARGO_BIN_EXE_rsa-keygen"),
        &["-p", "key.pub", "-s", "key.sec", "-n", num_bits, "--attempts", "100"],
        dir,
    );
    assert!(out.status.success(), "keygen failed: {}", String::from_utf8_lossy(&out.stderr));
}

#[test]
fn keygen_encrypt_decrypt_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    keygen(dir.path(), "512");

    let public = fs::read_to_string(dir.path().join("key.pub")).unwrap();
    let lines: Vec<&str> = public.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "512");
    assert_eq!(lines[2], "3");

    let secret = fs::read_to_string(dir.path().join("key.sec")).unwrap();
    assert_eq!(secret.lines().nth(1), Some(lines[1]));

    fs::write(dir.path().join("m.txt"), "12345\n").unwrap();
    let out = run(env!("CARGO_BIN_EXE_rsa-enc"), &["-k", "key.pub", "-i", "m.txt", "-o", "c.txt"], dir.path());
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let ciphertext = fs::read_to_string(dir.path().join("c.txt")).unwrap();
    assert_ne!(ciphertext, "12345\n");
    assert!(ciphertext.ends_with('\n'));

    let out = run(env!("CARGO_BIN_EXE_rsa-dec"), &["-k", "key.sec", "-i", "c.txt", "-o", "m2.txt"], dir.path());
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read_to_string(dir.path().join("m2.txt")).unwrap(), "12345\n");
}

#[test]
fn subcommands_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let bin = env!("CARGO_BIN_EXE_padded-rsa");

    let out = run(
        bin,
        &["keygen", "-p", "a.pub", "-s", "a.sec", "-n", "256", "--attempts", "100"],
        dir.path(),
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    fs::write(dir.path().join("m.txt"), "987654321").unwrap();
    let out = run(bin, &["encrypt", "-k", "a.pub", "-i", "m.txt", "-o", "c.txt"], dir.path());
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let out = run(
        bin,
        &["decrypt", "--verify-padding", "-k", "a.sec", "-i", "c.txt", "-o", "m2.txt"],
        dir.path(),
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read_to_string(dir.path().join("m2.txt")).unwrap(), "987654321\n");
}

#[test]
fn missing_arguments_exit_non_zero() {
    let dir = tempfile::tempdir().unwrap();

    let out = run(env!("CARGO_BIN_EXE_rsa-enc"), &["-k", "key.pub", "-i", "m.txt"], dir.path());
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("-k -i -o options are required"));

    let out = run(env!("CARGO_BIN_EXE_rsa-keygen"), &["-p", "key.pub", "-s", "key.sec"], dir.path());
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("-p -s -n options are required"));
    assert!(!dir.path().join("key.pub").exists());
}

#[test]
fn malformed_key_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("m.txt"), "1\n").unwrap();

    let keys = [
        "512\n3233\n",
        "512\nabc\n3\n",
        "512\n0\n3\n",
        "512\n1\n3\n",
        "18446744073709551614\n3233\n3\n",
    ];
    let tools = [env!("CARGO_BIN_EXE_rsa-enc"), env!("CARGO_BIN_EXE_rsa-dec")];

    for key in keys {
        fs::write(dir.path().join("bad.key"), key).unwrap();
        for tool in tools {
            let out = run(tool, &["-k", "bad.key", "-i", "m.txt", "-o", "out.txt"], dir.path());
            assert_eq!(out.status.code(), Some(1), "{key:?}");
            assert!(String::from_utf8_lossy(&out.stderr).contains("malformed key file"), "{key:?}");
            assert!(!dir.path().join("out.txt").exists());
        }
    }
}

#[test]
fn oversized_plaintext_rejected_by_default() {
    let dir = tempfile::tempdir().unwrap();
    keygen(dir.path(), "256");

    // 256 / 2 - 24 = 104 message bits; 2^104 needs 105
    fs::write(dir.path().join("m.txt"), "20282409603651670423947251286016\n").unwrap();
    let out = run(env!("CARGO_BIN_EXE_rsa-enc"), &["-k", "key.pub", "-i", "m.txt", "-o", "c.txt"], dir.path());
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("plaintext too large"));
    assert!(!dir.path().join("c.txt").exists());

    let out = run(
        env!("CARGO_BIN_EXE_rsa-enc"),
        &["--allow-oversized", "-k", "key.pub", "-i", "m.txt", "-o", "c.txt"],
        dir.path(),
    );
    assert!(out.status.success());
    let out = run(env!("CARGO_BIN_EXE_rsa-dec"), &["-k", "key.sec", "-i", "c.txt", "-o", "m2.txt"], dir.path());
    assert!(out.status.success());
    assert_eq!(fs::read_to_string(dir.path().join("m2.txt")).unwrap(), "0\n");
}

#[test]
fn arbitrary_ciphertext_decrypts() {
    let dir = tempfile::tempdir().unwrap();
    keygen(dir.path(), "512");

    fs::write(dir.path().join("c.txt"), "1\n").unwrap();
    let out = run(env!("CARGO_BIN_EXE_rsa-dec"), &["-k", "key.sec", "-i", "c.txt", "-o", "m.txt"], dir.path());
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read_to_string(dir.path().join("m.txt")).unwrap(), "1\n");

    let out = run(
        env!("CARGO_BIN_EXE_rsa-dec"),
        &["--verify-padding", "-k", "key.sec", "-i", "c.txt", "-o", "m3.txt"],
        dir.path(),
    );
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid padding"));
}
